//! Output formats and serialization options.
//!
//! This module provides the types that select and tune the output syntax:
//!
//! - [`Format`]: the target syntax (Turtle, TriG, N-Triples, N-Quads, canonical)
//! - [`SerializationOptions`]: one immutable configuration value
//! - [`DatatypePolicy`]: when `^^datatype` is written for literals
//! - [`PrefixOrdering`]: order of `@prefix` declarations
//! - [`BlankNodeStyle`]: whether blank nodes may be written as `[ … ]`
//!
//! Every format has its own defaults, available through the per-format
//! constructors or [`SerializationOptions::for_format`]. The `with_*` methods
//! adjust single fields. Options also implement `serde` traits, so they can
//! be loaded from an application's own configuration files; missing fields
//! take the Turtle defaults.
//!
//! ## Examples
//!
//! ```rust
//! use rdf_text::{DatatypePolicy, Format, SerializationOptions};
//!
//! // Turtle defaults with explicit datatypes and no pretty printing
//! let options = SerializationOptions::turtle()
//!     .with_literal_datatype_policy(DatatypePolicy::AlwaysTyped)
//!     .with_pretty_print(false);
//!
//! assert!(!options.pretty_print);
//! assert!(SerializationOptions::for_format(Format::NQuads).include_context);
//! ```

use crate::vocab;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported output syntaxes.
///
/// # Examples
///
/// ```rust
/// use rdf_text::Format;
///
/// assert_eq!(Format::TriG.to_string(), "TriG");
/// assert_eq!(Format::NTriples.file_extension(), "nt");
/// assert!(Format::Turtle.is_compact());
/// assert!(!Format::NQuads.is_compact());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    #[default]
    Turtle,
    #[serde(rename = "trig")]
    TriG,
    #[serde(rename = "ntriples")]
    NTriples,
    #[serde(rename = "nquads")]
    NQuads,
    Canonical,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Turtle,
        Format::TriG,
        Format::NTriples,
        Format::NQuads,
        Format::Canonical,
    ];

    /// Human-readable name of the syntax.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Format::Turtle => "Turtle",
            Format::TriG => "TriG",
            Format::NTriples => "N-Triples",
            Format::NQuads => "N-Quads",
            Format::Canonical => "Canonical RDF",
        }
    }

    /// Returns true for the compact family (Turtle and TriG).
    #[must_use]
    pub const fn is_compact(&self) -> bool {
        matches!(self, Format::Turtle | Format::TriG)
    }

    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Format::Turtle => "ttl",
            Format::TriG => "trig",
            Format::NTriples => "nt",
            Format::NQuads => "nq",
            Format::Canonical => "nq",
        }
    }

    #[must_use]
    pub const fn media_type(&self) -> &'static str {
        match self {
            Format::Turtle => "text/turtle",
            Format::TriG => "application/trig",
            Format::NTriples => "application/n-triples",
            Format::NQuads | Format::Canonical => "application/n-quads",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Controls when a literal's datatype is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatatypePolicy {
    /// Append `^^datatype` whenever the literal has one.
    AlwaysTyped,
    /// Suppress the implicit `xsd:string` datatype.
    #[default]
    Minimal,
}

/// Order of the `@prefix` declarations in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixOrdering {
    #[default]
    Alphabetical,
    /// Order in which the prefixes were bound.
    UsageOrder,
}

/// Whether blank nodes with a single use may be written inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankNodeStyle {
    /// Inline `[ … ]` where it is safe to do so.
    Anonymous,
    /// Always `_:label`.
    #[default]
    Named,
}

/// Configuration for one serialization call.
///
/// Fields that only make sense for the compact family (prefixes, grouping,
/// pretty printing, collections) are ignored by the line-based formats.
///
/// # Examples
///
/// ```rust
/// use rdf_text::{BlankNodeStyle, SerializationOptions};
///
/// let options = SerializationOptions::turtle();
/// assert!(options.use_collections);
/// assert_eq!(options.blank_node_style, BlankNodeStyle::Anonymous);
/// assert_eq!(options.custom_prefixes.get("xsd").map(String::as_str),
///            Some("http://www.w3.org/2001/XMLSchema#"));
///
/// let options = SerializationOptions::trig();
/// assert!(options.include_context);
/// assert_eq!(options.blank_node_style, BlankNodeStyle::Named);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializationOptions {
    pub strict_mode: bool,
    pub escape_unicode: bool,
    pub literal_datatype_policy: DatatypePolicy,
    pub base_iri: Option<String>,
    pub line_ending: String,
    pub validate_uris: bool,
    /// Relabel blank nodes `b0, b1, …` in order of first appearance.
    pub stable_blank_node_ids: bool,
    pub include_context: bool,
    pub trailing_dot: bool,

    pub use_prefixes: bool,
    /// Bind a suggested prefix for every namespace used in the data.
    pub auto_declare_prefixes: bool,
    pub prefix_ordering: PrefixOrdering,
    /// Prefix label to namespace, declared before any suggested prefix.
    pub custom_prefixes: IndexMap<String, String>,
    pub use_collections: bool,
    pub blank_node_style: BlankNodeStyle,
    pub use_compact_triples: bool,
    pub use_rdf_type_shortcut: bool,
    pub use_multiline_literals: bool,
    pub pretty_print: bool,
    pub indent: String,
    pub max_line_length: usize,
    pub group_by_subject: bool,
    pub sort_subjects: bool,
    pub sort_predicates: bool,
}

impl Default for SerializationOptions {
    fn default() -> Self {
        SerializationOptions::turtle()
    }
}

impl SerializationOptions {
    fn base() -> Self {
        SerializationOptions {
            strict_mode: true,
            escape_unicode: false,
            literal_datatype_policy: DatatypePolicy::Minimal,
            base_iri: None,
            line_ending: "\n".to_string(),
            validate_uris: true,
            stable_blank_node_ids: false,
            include_context: false,
            trailing_dot: true,
            use_prefixes: true,
            auto_declare_prefixes: true,
            prefix_ordering: PrefixOrdering::Alphabetical,
            custom_prefixes: IndexMap::new(),
            use_collections: false,
            blank_node_style: BlankNodeStyle::Named,
            use_compact_triples: true,
            use_rdf_type_shortcut: true,
            use_multiline_literals: true,
            pretty_print: true,
            indent: "  ".to_string(),
            max_line_length: 80,
            group_by_subject: true,
            sort_subjects: false,
            sort_predicates: false,
        }
    }

    fn standard_prefixes() -> IndexMap<String, String> {
        [
            ("rdf", vocab::RDF_NS),
            ("rdfs", vocab::RDFS_NS),
            ("xsd", vocab::XSD_NS),
            ("owl", vocab::OWL_NS),
        ]
        .into_iter()
        .map(|(prefix, ns)| (prefix.to_string(), ns.to_string()))
        .collect()
    }

    /// Creates the default options (Turtle).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turtle defaults: collections and anonymous blank nodes on, URI
    /// validation off, the rdf/rdfs/xsd/owl prefixes pre-declared.
    #[must_use]
    pub fn turtle() -> Self {
        SerializationOptions {
            validate_uris: false,
            use_collections: true,
            blank_node_style: BlankNodeStyle::Anonymous,
            custom_prefixes: Self::standard_prefixes(),
            ..Self::base()
        }
    }

    /// TriG defaults: named graphs written, blank nodes kept named.
    #[must_use]
    pub fn trig() -> Self {
        SerializationOptions {
            include_context: true,
            custom_prefixes: Self::standard_prefixes(),
            ..Self::base()
        }
    }

    #[must_use]
    pub fn ntriples() -> Self {
        Self::base()
    }

    #[must_use]
    pub fn nquads() -> Self {
        SerializationOptions {
            include_context: true,
            ..Self::base()
        }
    }

    /// Canonical line output: contexts written, non-ASCII escaped.
    #[must_use]
    pub fn canonical() -> Self {
        SerializationOptions {
            include_context: true,
            escape_unicode: true,
            ..Self::base()
        }
    }

    /// Returns the defaults for `format`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdf_text::{Format, SerializationOptions};
    ///
    /// assert_eq!(SerializationOptions::for_format(Format::Turtle), SerializationOptions::turtle());
    /// assert!(!SerializationOptions::for_format(Format::NTriples).include_context);
    /// ```
    #[must_use]
    pub fn for_format(format: Format) -> Self {
        match format {
            Format::Turtle => Self::turtle(),
            Format::TriG => Self::trig(),
            Format::NTriples => Self::ntriples(),
            Format::NQuads => Self::nquads(),
            Format::Canonical => Self::canonical(),
        }
    }

    #[must_use]
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    #[must_use]
    pub fn with_escape_unicode(mut self, escape: bool) -> Self {
        self.escape_unicode = escape;
        self
    }

    #[must_use]
    pub fn with_literal_datatype_policy(mut self, policy: DatatypePolicy) -> Self {
        self.literal_datatype_policy = policy;
        self
    }

    /// Sets the base IRI written as `@base` in compact output.
    #[must_use]
    pub fn with_base_iri(mut self, base: impl Into<String>) -> Self {
        self.base_iri = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }

    #[must_use]
    pub fn with_validate_uris(mut self, validate: bool) -> Self {
        self.validate_uris = validate;
        self
    }

    #[must_use]
    pub fn with_stable_blank_node_ids(mut self, stable: bool) -> Self {
        self.stable_blank_node_ids = stable;
        self
    }

    #[must_use]
    pub fn with_include_context(mut self, include: bool) -> Self {
        self.include_context = include;
        self
    }

    #[must_use]
    pub fn with_trailing_dot(mut self, trailing_dot: bool) -> Self {
        self.trailing_dot = trailing_dot;
        self
    }

    #[must_use]
    pub fn with_prefixes(mut self, use_prefixes: bool) -> Self {
        self.use_prefixes = use_prefixes;
        self
    }

    #[must_use]
    pub fn with_auto_declare_prefixes(mut self, auto_declare: bool) -> Self {
        self.auto_declare_prefixes = auto_declare;
        self
    }

    #[must_use]
    pub fn with_prefix_ordering(mut self, ordering: PrefixOrdering) -> Self {
        self.prefix_ordering = ordering;
        self
    }

    /// Declares `prefix` for `namespace`, replacing an earlier declaration of
    /// the same prefix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdf_text::SerializationOptions;
    ///
    /// let options = SerializationOptions::turtle().with_prefix("ex", "http://example.org/");
    /// assert_eq!(options.custom_prefixes.get("ex").map(String::as_str), Some("http://example.org/"));
    /// ```
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.custom_prefixes.insert(prefix.into(), namespace.into());
        self
    }

    /// Removes every pre-declared prefix.
    #[must_use]
    pub fn without_custom_prefixes(mut self) -> Self {
        self.custom_prefixes.clear();
        self
    }

    #[must_use]
    pub fn with_collections(mut self, use_collections: bool) -> Self {
        self.use_collections = use_collections;
        self
    }

    #[must_use]
    pub fn with_blank_node_style(mut self, style: BlankNodeStyle) -> Self {
        self.blank_node_style = style;
        self
    }

    #[must_use]
    pub fn with_compact_triples(mut self, compact: bool) -> Self {
        self.use_compact_triples = compact;
        self
    }

    #[must_use]
    pub fn with_rdf_type_shortcut(mut self, shortcut: bool) -> Self {
        self.use_rdf_type_shortcut = shortcut;
        self
    }

    #[must_use]
    pub fn with_multiline_literals(mut self, multiline: bool) -> Self {
        self.use_multiline_literals = multiline;
        self
    }

    #[must_use]
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    #[must_use]
    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    #[must_use]
    pub fn with_group_by_subject(mut self, group: bool) -> Self {
        self.group_by_subject = group;
        self
    }

    #[must_use]
    pub fn with_sort_subjects(mut self, sort: bool) -> Self {
        self.sort_subjects = sort;
        self
    }

    #[must_use]
    pub fn with_sort_predicates(mut self, sort: bool) -> Self {
        self.sort_predicates = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        let names: Vec<_> = Format::ALL.iter().map(Format::name).collect();
        assert_eq!(
            names,
            vec!["Turtle", "TriG", "N-Triples", "N-Quads", "Canonical RDF"]
        );
    }

    #[test]
    fn test_per_format_defaults() {
        let nt = SerializationOptions::ntriples();
        assert!(nt.strict_mode);
        assert!(nt.validate_uris);
        assert!(!nt.include_context);
        assert!(nt.trailing_dot);

        let canonical = SerializationOptions::canonical();
        assert!(canonical.escape_unicode);
        assert!(canonical.include_context);

        let trig = SerializationOptions::trig();
        assert!(!trig.use_collections);
        assert_eq!(trig.custom_prefixes.len(), 4);
    }

    #[test]
    fn test_missing_fields_take_turtle_defaults() {
        let options: SerializationOptions =
            serde_json::from_str(r#"{"pretty_print": false, "prefix_ordering": "usage_order"}"#)
                .unwrap();
        assert!(!options.pretty_print);
        assert_eq!(options.prefix_ordering, PrefixOrdering::UsageOrder);
        assert!(options.use_collections);
        assert_eq!(options.indent, "  ");
    }

    #[test]
    fn test_format_serde_names() {
        assert_eq!(serde_json::to_string(&Format::NTriples).unwrap(), "\"ntriples\"");
        let format: Format = serde_json::from_str("\"trig\"").unwrap();
        assert_eq!(format, Format::TriG);
    }
}
