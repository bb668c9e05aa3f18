//! Term encoding.
//!
//! [`TermEncoder`] renders single terms into a string buffer. In compact mode
//! it uses prefixed names, the `a` shortcut and long literals, and expands
//! consumed blank nodes into `( … )` and `[ … ]` by recursing into the
//! [`Structure`]. In line mode every term is written in full.
//!
//! The caller passes the set of blank nodes currently being expanded; a node
//! already in that set is written as its label, so expansion always
//! terminates.

use crate::analyzer::Structure;
use crate::error::{EncodeResult, ErrorKind};
use crate::labels::BlankNodeLabels;
use crate::namespace::NamespaceBinding;
use crate::options::{DatatypePolicy, SerializationOptions};
use crate::term::{BlankNode, Iri, Literal, Resource, Statement, Term};
use crate::vocab;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt::Write as _;

/// Blank nodes whose expansion is in progress.
pub(crate) type Guard<'e> = HashSet<&'e BlankNode>;

pub(crate) struct TermEncoder<'e> {
    options: &'e SerializationOptions,
    labels: &'e BlankNodeLabels<'e>,
    namespaces: Option<&'e NamespaceBinding>,
    structure: Option<&'e Structure<'e>>,
}

impl<'e> TermEncoder<'e> {
    /// Encoder for the line-based formats.
    pub fn line(options: &'e SerializationOptions, labels: &'e BlankNodeLabels<'e>) -> Self {
        TermEncoder {
            options,
            labels,
            namespaces: None,
            structure: None,
        }
    }

    /// Encoder for Turtle and TriG.
    pub fn compact(
        options: &'e SerializationOptions,
        labels: &'e BlankNodeLabels<'e>,
        namespaces: &'e NamespaceBinding,
        structure: &'e Structure<'e>,
    ) -> Self {
        TermEncoder {
            options,
            labels,
            namespaces: Some(namespaces),
            structure: Some(structure),
        }
    }

    fn is_compact(&self) -> bool {
        self.structure.is_some()
    }

    /// Writes a term without structural expansion.
    pub fn encode_term(&self, out: &mut String, term: &Term) -> EncodeResult<()> {
        match term {
            Term::Iri(iri) => self.encode_iri(out, iri),
            Term::BlankNode(node) => self.encode_blank_node(out, node),
            Term::Literal(literal) => self.encode_literal(out, literal),
        }
    }

    pub fn encode_resource(&self, out: &mut String, resource: &Resource) -> EncodeResult<()> {
        match resource {
            Resource::Iri(iri) => self.encode_iri(out, iri),
            Resource::BlankNode(node) => self.encode_blank_node(out, node),
        }
    }

    pub fn encode_iri(&self, out: &mut String, iri: &Iri) -> EncodeResult<()> {
        let value = iri.as_str();
        if self.options.strict_mode && self.options.validate_uris {
            if let Some(bad) = value.chars().find(|c| matches!(c, ' ' | '"' | '<' | '>')) {
                return Err(ErrorKind::validation(format!(
                    "IRI <{value}> contains illegal character {bad:?}"
                )));
            }
        }

        if self.options.use_prefixes {
            if let Some(prefixed) = self.namespaces.and_then(|ns| ns.prefixed_form(value)) {
                // prefixed names cannot carry \u escapes
                if !self.options.escape_unicode || prefixed.is_ascii() {
                    out.push_str(&prefixed);
                    return Ok(());
                }
            }
        }

        out.push('<');
        for ch in value.chars() {
            match ch {
                '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => push_uchar(out, ch),
                c if c.is_ascii_control() => push_uchar(out, c),
                c if !c.is_ascii() && self.options.escape_unicode => push_uchar(out, c),
                c => out.push(c),
            }
        }
        out.push('>');
        Ok(())
    }

    /// Writes a predicate, using `a` for `rdf:type` where allowed.
    pub fn encode_predicate(&self, out: &mut String, predicate: &Iri) -> EncodeResult<()> {
        if self.is_compact()
            && self.options.use_rdf_type_shortcut
            && predicate.as_str() == vocab::RDF_TYPE
        {
            out.push('a');
            return Ok(());
        }
        self.encode_iri(out, predicate)
    }

    pub fn encode_blank_node(&self, out: &mut String, node: &BlankNode) -> EncodeResult<()> {
        out.push_str("_:");
        out.push_str(self.labels.label(node)?);
        Ok(())
    }

    pub fn encode_literal(&self, out: &mut String, literal: &Literal) -> EncodeResult<()> {
        let language = literal.language();
        let datatype = literal.datatype();

        if let Some(lang) = language {
            if !is_valid_language_tag(lang) {
                return Err(ErrorKind::invalid_data(format!(
                    "malformed language tag '{lang}'"
                )));
            }
        }
        if self.options.strict_mode {
            let lang_string = datatype.is_some_and(|dt| dt.as_str() == vocab::RDF_LANG_STRING);
            if language.is_some() && !lang_string {
                return Err(ErrorKind::validation(format!(
                    "literal \"{}\" has a language tag but datatype {}",
                    literal.label(),
                    datatype.map_or("<none>", Iri::as_str)
                )));
            }
            if language.is_none() && lang_string {
                return Err(ErrorKind::validation(format!(
                    "literal \"{}\" has datatype rdf:langString but no language tag",
                    literal.label()
                )));
            }
        }

        let label = literal.label();
        if self.is_compact() && self.options.use_multiline_literals && label.contains(['\n', '\r']) {
            self.push_long_string(out, label);
        } else {
            self.push_short_string(out, label);
        }

        if let Some(lang) = language {
            out.push('@');
            out.push_str(lang);
        } else if let Some(dt) = datatype.filter(|dt| self.writes_datatype(dt)) {
            out.push_str("^^");
            self.encode_iri(out, dt)?;
        }
        Ok(())
    }

    /// Returns true if `^^datatype` is written for a literal without language.
    pub fn writes_datatype(&self, datatype: &Iri) -> bool {
        match self.options.literal_datatype_policy {
            DatatypePolicy::AlwaysTyped => true,
            DatatypePolicy::Minimal => datatype.as_str() != vocab::XSD_STRING,
        }
    }

    fn push_short_string(&self, out: &mut String, label: &str) {
        out.push('"');
        for ch in label.chars() {
            match ch {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{0008}' => out.push_str("\\b"),
                '\u{000C}' => out.push_str("\\f"),
                c if c.is_control() => push_uchar(out, c),
                c if !c.is_ascii() && self.options.escape_unicode => push_uchar(out, c),
                c => out.push(c),
            }
        }
        out.push('"');
    }

    fn push_long_string(&self, out: &mut String, label: &str) {
        out.push_str("\"\"\"");
        for ch in label.chars() {
            match ch {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' | '\r' | '\t' => out.push(ch),
                c if c.is_control() => push_uchar(out, c),
                c if !c.is_ascii() && self.options.escape_unicode => push_uchar(out, c),
                c => out.push(c),
            }
        }
        out.push_str("\"\"\"");
    }

    /// Writes an object, expanding collections and inline blank nodes.
    ///
    /// `level` is the nesting level of the subject that owns the object.
    pub fn encode_object(
        &self,
        out: &mut String,
        object: &'e Term,
        level: usize,
        guard: &mut Guard<'e>,
    ) -> EncodeResult<()> {
        match object {
            Term::BlankNode(node) => self.encode_blank_object(out, node, level, guard),
            Term::Iri(iri)
                if self.is_compact()
                    && self.options.use_collections
                    && iri.as_str() == vocab::RDF_NIL =>
            {
                out.push_str("()");
                Ok(())
            }
            other => self.encode_term(out, other),
        }
    }

    fn encode_blank_object(
        &self,
        out: &mut String,
        node: &'e BlankNode,
        level: usize,
        guard: &mut Guard<'e>,
    ) -> EncodeResult<()> {
        let Some(structure) = self.structure else {
            return self.encode_blank_node(out, node);
        };
        if guard.contains(node) {
            return self.encode_blank_node(out, node);
        }

        if let Some(items) = structure.list_items(node) {
            guard.insert(node);
            let result = self.encode_list(out, items, level, guard);
            guard.remove(node);
            return result;
        }
        if structure.is_inline(node) {
            return self.encode_inline(out, node, level + 1, guard);
        }
        self.encode_blank_node(out, node)
    }

    fn encode_list(
        &self,
        out: &mut String,
        items: &'e [&'e Term],
        level: usize,
        guard: &mut Guard<'e>,
    ) -> EncodeResult<()> {
        out.push('(');
        for &item in items {
            out.push(' ');
            self.encode_object(out, item, level, guard)?;
        }
        out.push_str(" )");
        Ok(())
    }

    /// Writes `[ p o ; … ]` for a consumed blank node whose bracket sits at
    /// nesting `level`.
    pub fn encode_inline(
        &self,
        out: &mut String,
        node: &'e BlankNode,
        level: usize,
        guard: &mut Guard<'e>,
    ) -> EncodeResult<()> {
        let statements = self
            .structure
            .map(|structure| structure.statements_about(node))
            .unwrap_or(&[]);
        if statements.is_empty() {
            out.push_str("[]");
            return Ok(());
        }

        guard.insert(node);
        let result = if self.options.pretty_print && statements.len() > 1 {
            out.push('[');
            self.newline(out, level + 1);
            let result = self.encode_property_list(out, statements, level, guard);
            self.newline(out, level);
            out.push(']');
            result
        } else {
            out.push_str("[ ");
            let result = self.encode_property_list(out, statements, level, guard);
            out.push_str(" ]");
            result
        };
        guard.remove(node);
        result
    }

    /// Writes the predicate-object list of a subject at nesting `level`.
    ///
    /// Predicates after the first go one level deeper; objects that do not
    /// fit on the line go two levels deeper.
    pub fn encode_property_list(
        &self,
        out: &mut String,
        statements: &[&'e Statement],
        level: usize,
        guard: &mut Guard<'e>,
    ) -> EncodeResult<()> {
        let pretty = self.options.pretty_print;
        let groups = group_by_predicate(statements, self.options.sort_predicates);

        for (i, (predicate, objects)) in groups.into_iter().enumerate() {
            if i > 0 {
                out.push_str(" ;");
                if pretty {
                    self.newline(out, level + 1);
                } else {
                    out.push(' ');
                }
            }
            self.encode_predicate(out, predicate)?;

            for (j, object) in objects.into_iter().enumerate() {
                if j == 0 {
                    out.push(' ');
                    self.encode_object(out, object, level, guard)?;
                    continue;
                }
                out.push(',');
                let mut rendered = String::new();
                self.encode_object(&mut rendered, object, level, guard)?;
                if pretty && !self.fits(out, &rendered) {
                    self.newline(out, level + 2);
                } else {
                    out.push(' ');
                }
                out.push_str(&rendered);
            }
        }
        Ok(())
    }

    /// Starts a new line indented to `level`.
    pub fn newline(&self, out: &mut String, level: usize) {
        out.push_str(&self.options.line_ending);
        for _ in 0..level {
            out.push_str(&self.options.indent);
        }
    }

    fn fits(&self, out: &str, next: &str) -> bool {
        let max = self.options.max_line_length;
        max == 0 || next.contains('\n') || current_column(out) + 1 + next.chars().count() <= max
    }
}

/// Groups statements by predicate, keeping first-appearance order unless
/// `sort` is set.
pub(crate) fn group_by_predicate<'s>(
    statements: &[&'s Statement],
    sort: bool,
) -> Vec<(&'s Iri, Vec<&'s Term>)> {
    let mut groups: IndexMap<&'s Iri, Vec<&'s Term>> = IndexMap::new();
    for st in statements {
        groups.entry(&st.predicate).or_default().push(&st.object);
    }
    let mut groups: Vec<_> = groups.into_iter().collect();
    if sort {
        groups.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
    }
    groups
}

fn current_column(out: &str) -> usize {
    out.rsplit('\n').next().map_or(0, |line| line.chars().count())
}

fn push_uchar(out: &mut String, ch: char) {
    let code = ch as u32;
    if code <= 0xFFFF {
        let _ = write!(out, "\\u{code:04X}");
    } else {
        let _ = write!(out, "\\U{code:08X}");
    }
}

/// Checks `[a-zA-Z]+(-[a-zA-Z0-9]+)*`.
pub(crate) fn is_valid_language_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let primary_ok = parts
        .next()
        .is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphabetic()));
    primary_ok && parts.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()))
}
