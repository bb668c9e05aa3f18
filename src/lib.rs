//! # rdf_text
//!
//! A structural serializer for RDF statements in text syntaxes.
//!
//! ## Supported Formats
//!
//! - **Turtle** and **TriG**: compact, human-oriented syntax with prefixed
//!   names, subject grouping, collections and anonymous blank nodes
//! - **N-Triples** and **N-Quads**: one statement per line
//! - **Canonical**: sorted N-Quads lines with deterministic blank node labels
//!
//! ## Key Features
//!
//! - **Structural rewriting**: RDF lists become `( … )` and single-use blank
//!   nodes become `[ … ]`, only where the rewrite preserves the graph
//! - **Prefix management**: pre-declared prefixes plus suggested ones for
//!   every namespace in the data, with collision avoidance
//! - **Strict validation**: illegal IRIs and inconsistent literals are
//!   reported instead of producing unreadable output
//! - **Streaming**: output goes through a buffered writer and is flushed on
//!   every exit path
//!
//! ## Quick Start
//!
//! ```rust
//! use rdf_text::{to_string, BlankNode, Format, Iri, Literal, Statement, StatementSet};
//!
//! let alice = Iri::new("http://example.org/alice");
//! let address = BlankNode::new("addr");
//!
//! let mut set = StatementSet::new();
//! set.insert(Statement::new(alice.clone(), Iri::new("http://xmlns.com/foaf/0.1/name"), "Alice"));
//! set.insert(Statement::new(alice, Iri::new("http://example.org/address"), address.clone()));
//! set.insert(Statement::new(address, Iri::new("http://example.org/city"), Literal::lang("Paris", "fr")));
//!
//! let turtle = to_string(&set, Format::Turtle).unwrap();
//! assert!(turtle.contains("@prefix foaf: <http://xmlns.com/foaf/0.1/> ."));
//! assert!(turtle.contains("example:address [ example:city \"Paris\"@fr ]"));
//! ```
//!
//! ### Building Graphs with the graph! Macro
//!
//! ```rust
//! use rdf_text::{graph, iri, to_string, Format};
//!
//! let set = graph! {
//!     (iri!("http://example.org/s"), iri!("http://example.org/p"), "o"),
//! };
//! let nt = to_string(&set, Format::NTriples).unwrap();
//! assert_eq!(nt, "<http://example.org/s> <http://example.org/p> \"o\" .\n");
//! ```
//!
//! ## Logging
//!
//! The library reports rejected prefix bindings and dropped contexts through
//! `tracing` at `warn` level, and per-call summaries at `debug` level. No
//! subscriber is installed.
//!
//! ## Syntax Reference
//!
//! See the [`syntax`] module for the exact output of every construct.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Serializing a small graph in every format
//! - **`custom_options.rs`** - Prefixes, datatype policy and layout options
//!
//! Run any example with: `cargo run --example <name>`

pub mod analyzer;
mod compact;
mod encoder;
pub mod error;
pub mod graph;
mod labels;
mod line;
pub mod macros;
pub mod namespace;
pub mod options;
pub mod ser;
pub mod syntax;
pub mod term;
pub mod vocab;

pub use error::{Error, ErrorKind, Result};
pub use graph::StatementSet;
pub use namespace::NamespaceBinding;
pub use options::{BlankNodeStyle, DatatypePolicy, Format, PrefixOrdering, SerializationOptions};
pub use ser::Serializer;
pub use term::{BlankNode, Iri, Literal, Resource, Statement, Term};

use std::io;

/// Serialize `statements` to a string with the defaults of `format`.
///
/// # Examples
///
/// ```rust
/// use rdf_text::{to_string, Format, Iri, Statement, StatementSet};
///
/// let mut set = StatementSet::new();
/// set.insert(Statement::new(
///     Iri::new("http://example.org/s"),
///     Iri::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
///     Iri::new("http://example.org/Thing"),
/// ));
///
/// let turtle = to_string(&set, Format::Turtle).unwrap();
/// assert!(turtle.ends_with("example:s a example:Thing .\n"));
/// ```
///
/// # Errors
///
/// Returns an error if a term cannot be represented in `format` or violates
/// a strict-mode rule.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(statements: &StatementSet, format: Format) -> Result<String> {
    to_string_with_options(statements, format, SerializationOptions::for_format(format))
}

/// Serialize `statements` to a string with custom options.
///
/// # Examples
///
/// ```rust
/// use rdf_text::{to_string_with_options, Format, Iri, SerializationOptions, Statement, StatementSet};
///
/// let mut set = StatementSet::new();
/// set.insert(Statement::new(Iri::new("http://example.org/s"), Iri::new("http://example.org/p"), "v"));
///
/// let options = SerializationOptions::turtle()
///     .without_custom_prefixes()
///     .with_prefix("ex", "http://example.org/")
///     .with_auto_declare_prefixes(false);
/// let turtle = to_string_with_options(&set, Format::Turtle, options).unwrap();
/// assert_eq!(turtle, "@prefix ex: <http://example.org/> .\n\nex:s ex:p \"v\" .\n");
/// ```
///
/// # Errors
///
/// Returns an error if a term cannot be represented in `format` or violates
/// a strict-mode rule.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(
    statements: &StatementSet,
    format: Format,
    options: SerializationOptions,
) -> Result<String> {
    let mut serializer = Serializer::new(Vec::with_capacity(256), format, options);
    serializer.serialize(statements)?;
    let bytes = serializer.into_inner()?;
    String::from_utf8(bytes).map_err(|e| ErrorKind::invalid_data(e).in_format(format))
}

/// Serialize `statements` to a writer with the defaults of `format`.
///
/// # Examples
///
/// ```rust
/// use rdf_text::{to_writer, Format, Iri, Statement, StatementSet};
///
/// let mut set = StatementSet::new();
/// set.insert(Statement::new(Iri::new("http://example.org/s"), Iri::new("http://example.org/p"), "v"));
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &set, Format::NQuads).unwrap();
/// assert!(!buffer.is_empty());
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, statements: &StatementSet, format: Format) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, statements, format, SerializationOptions::for_format(format))
}

/// Serialize `statements` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(
    writer: W,
    statements: &StatementSet,
    format: Format,
    options: SerializationOptions,
) -> Result<()>
where
    W: io::Write,
{
    let mut serializer = Serializer::new(writer, format, options);
    serializer.serialize(statements)?;
    serializer.into_inner().map(drop)
}
