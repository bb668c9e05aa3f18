//! RDF terms and statements.
//!
//! This module provides the value types every serializer operates on:
//!
//! - [`Iri`]: an absolute resource identifier
//! - [`BlankNode`]: a document-scoped anonymous resource
//! - [`Literal`]: a label with an optional language tag and an optional datatype
//! - [`Term`]: any of the three
//! - [`Resource`]: the subset of terms usable as a subject or a context
//! - [`Statement`]: a triple, optionally tagged with a context (named graph)
//!
//! All of them are immutable value types with structural equality.
//!
//! ## Creating Terms
//!
//! ```rust
//! use rdf_text::{BlankNode, Iri, Literal, Statement, Term};
//!
//! let alice = Iri::new("http://example.org/alice");
//! let name = Iri::new("http://xmlns.com/foaf/0.1/name");
//!
//! // Plain Rust values convert to typed literals
//! let age = Literal::from(42);
//! assert_eq!(age.datatype().map(|d| d.as_str()), Some("http://www.w3.org/2001/XMLSchema#integer"));
//!
//! // Strings become xsd:string literals
//! let stmt = Statement::new(alice.clone(), name, "Alice");
//! assert!(stmt.object.is_literal());
//!
//! // Language-tagged strings carry rdf:langString
//! let greeting = Literal::lang("bonjour", "fr");
//! assert_eq!(greeting.language(), Some("fr"));
//!
//! let node: Term = BlankNode::new("b0").into();
//! assert!(node.is_blank_node());
//! ```

use crate::vocab;
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An absolute IRI, stored in its expanded form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(value: impl Into<String>) -> Self {
        Iri(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// Blank node identifier.
///
/// The id is stored without the `_:` prefix. It is only meaningful inside
/// one document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlankNode(String);

impl BlankNode {
    /// Creates a blank node from its label, without the `_:` prefix.
    pub fn new(id: impl Into<String>) -> Self {
        BlankNode(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// A literal value.
///
/// The datatype is optional so that callers can represent plain literals;
/// the convenience constructors always set the datatype RDF 1.1 implies.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datatype: Option<Iri>,
}

impl Literal {
    /// Creates an `xsd:string` literal.
    pub fn new(label: impl Into<String>) -> Self {
        Literal::typed(label, Iri::new(vocab::XSD_STRING))
    }

    /// Creates a literal with no datatype at all.
    pub fn plain(label: impl Into<String>) -> Self {
        Literal {
            label: label.into(),
            language: None,
            datatype: None,
        }
    }

    pub fn typed(label: impl Into<String>, datatype: Iri) -> Self {
        Literal {
            label: label.into(),
            language: None,
            datatype: Some(datatype),
        }
    }

    /// Creates a language-tagged string (datatype `rdf:langString`).
    pub fn lang(label: impl Into<String>, language: impl Into<String>) -> Self {
        Literal {
            label: label.into(),
            language: Some(language.into()),
            datatype: Some(Iri::new(vocab::RDF_LANG_STRING)),
        }
    }

    /// Builds a literal from its raw parts without any consistency checks.
    ///
    /// Strict-mode serialization rejects combinations that RDF does not allow,
    /// such as a language tag paired with a datatype other than `rdf:langString`.
    pub fn from_parts(label: impl Into<String>, language: Option<String>, datatype: Option<Iri>) -> Self {
        Literal {
            label: label.into(),
            language,
            datatype,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for ch in self.label.chars() {
            match ch {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")?;
        match (&self.language, &self.datatype) {
            (Some(lang), _) => write!(f, "@{lang}"),
            (None, Some(datatype)) => write!(f, "^^{datatype}"),
            (None, None) => Ok(()),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::new(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::new(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::typed(value.to_string(), Iri::new(vocab::XSD_INTEGER))
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::from(value as i64)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        let label = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            if value.is_sign_positive() { "INF" } else { "-INF" }.to_string()
        } else {
            format!("{value:?}")
        };
        Literal::typed(label, Iri::new(vocab::XSD_DOUBLE))
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::typed(value.to_string(), Iri::new(vocab::XSD_BOOLEAN))
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::typed(
            value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Iri::new(vocab::XSD_DATE_TIME),
        )
    }
}

impl From<BigInt> for Literal {
    fn from(value: BigInt) -> Self {
        Literal::typed(value.to_string(), Iri::new(vocab::XSD_INTEGER))
    }
}

/// Any RDF term.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Iri(Iri),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl Term {
    #[must_use]
    pub const fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    #[must_use]
    pub const fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Term::BlankNode(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// The IRI text, blank node id or literal label.
    pub fn string_value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri.as_str(),
            Term::BlankNode(node) => node.id(),
            Term::Literal(literal) => literal.label(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => iri.fmt(f),
            Term::BlankNode(node) => node.fmt(f),
            Term::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<Iri> for Term {
    fn from(value: Iri) -> Self {
        Term::Iri(value)
    }
}

impl From<BlankNode> for Term {
    fn from(value: BlankNode) -> Self {
        Term::BlankNode(value)
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Term::Literal(value)
    }
}

impl From<Resource> for Term {
    fn from(value: Resource) -> Self {
        match value {
            Resource::Iri(iri) => Term::Iri(iri),
            Resource::BlankNode(node) => Term::BlankNode(node),
        }
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Literal(Literal::new(value))
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::Literal(Literal::new(value))
    }
}

/// A term that can stand as a subject or a context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Iri(Iri),
    BlankNode(BlankNode),
}

impl Resource {
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Resource::BlankNode(node) => Some(node),
            Resource::Iri(_) => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Resource::Iri(iri) => Some(iri),
            Resource::BlankNode(_) => None,
        }
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Resource::BlankNode(_))
    }

    pub fn string_value(&self) -> &str {
        match self {
            Resource::Iri(iri) => iri.as_str(),
            Resource::BlankNode(node) => node.id(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Iri(iri) => iri.fmt(f),
            Resource::BlankNode(node) => node.fmt(f),
        }
    }
}

impl From<Iri> for Resource {
    fn from(value: Iri) -> Self {
        Resource::Iri(value)
    }
}

impl From<BlankNode> for Resource {
    fn from(value: BlankNode) -> Self {
        Resource::BlankNode(value)
    }
}

impl TryFrom<Term> for Resource {
    type Error = Term;

    fn try_from(value: Term) -> Result<Self, Self::Error> {
        match value {
            Term::Iri(iri) => Ok(Resource::Iri(iri)),
            Term::BlankNode(node) => Ok(Resource::BlankNode(node)),
            other => Err(other),
        }
    }
}

/// A subject–predicate–object fact, optionally inside a named graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Resource,
    pub predicate: Iri,
    pub object: Term,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Resource>,
}

impl Statement {
    /// Creates a statement in the default graph.
    pub fn new(subject: impl Into<Resource>, predicate: Iri, object: impl Into<Term>) -> Self {
        Statement {
            subject: subject.into(),
            predicate,
            object: object.into(),
            context: None,
        }
    }

    /// Creates a statement inside the named graph `context`.
    pub fn quad(
        subject: impl Into<Resource>,
        predicate: Iri,
        object: impl Into<Term>,
        context: impl Into<Resource>,
    ) -> Self {
        Statement {
            context: Some(context.into()),
            ..Statement::new(subject, predicate, object)
        }
    }

    /// Returns the same triple moved into `context`.
    #[must_use]
    pub fn in_context(mut self, context: Option<Resource>) -> Self {
        self.context = context;
        self
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if let Some(context) = &self.context {
            write!(f, " {context}")?;
        }
        f.write_str(" .")
    }
}
