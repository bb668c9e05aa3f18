//! RDF text serialization.
//!
//! This module provides the [`Serializer`] that writes a [`StatementSet`]
//! to any [`io::Write`] sink in one of the supported [`Format`]s.
//!
//! ## Overview
//!
//! The compact formats apply structural rewrites on top of plain triples:
//!
//! - **Prefixed names**: `ex:alice` instead of `<http://example.org/alice>`
//! - **Grouping**: `;` between predicates and `,` between objects of a subject
//! - **Collections**: RDF lists written as `( a b c )`
//! - **Anonymous nodes**: single-use blank nodes written as `[ p o ]`
//!
//! The line formats write every statement in full on its own line.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use rdf_text::{to_string, Format, Iri, Statement, StatementSet};
//!
//! let mut set = StatementSet::new();
//! set.insert(Statement::new(
//!     Iri::new("http://example.org/s"),
//!     Iri::new("http://example.org/p"),
//!     "o",
//! ));
//!
//! let nt = to_string(&set, Format::NTriples).unwrap();
//! assert_eq!(nt, "<http://example.org/s> <http://example.org/p> \"o\" .\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! A [`Serializer`] owns its sink and can write several statement sets in a
//! row:
//!
//! ```rust
//! use rdf_text::{Format, Iri, SerializationOptions, Serializer, Statement, StatementSet};
//!
//! let mut set = StatementSet::new();
//! set.insert(Statement::new(
//!     Iri::new("http://example.org/s"),
//!     Iri::new("http://example.org/p"),
//!     Iri::new("http://example.org/o"),
//! ));
//!
//! let mut serializer = Serializer::new(Vec::new(), Format::NQuads, SerializationOptions::nquads());
//! serializer.serialize(&set).unwrap();
//!
//! let bytes = serializer.into_inner().unwrap();
//! assert!(String::from_utf8(bytes).unwrap().ends_with(" .\n"));
//! ```

use crate::error::{ErrorKind, Result};
use crate::graph::StatementSet;
use crate::options::{Format, SerializationOptions};
use crate::{compact, line};
use std::io::{self, BufWriter, Write};

/// Writes statement sets to a buffered sink.
pub struct Serializer<W: io::Write> {
    output: BufWriter<W>,
    format: Format,
    options: SerializationOptions,
}

impl<W: io::Write> Serializer<W> {
    pub fn new(writer: W, format: Format, options: SerializationOptions) -> Self {
        Serializer {
            output: BufWriter::new(writer),
            format,
            options,
        }
    }

    /// Creates a serializer with the defaults of `format`.
    pub fn with_defaults(writer: W, format: Format) -> Self {
        Self::new(writer, format, SerializationOptions::for_format(format))
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn options(&self) -> &SerializationOptions {
        &self.options
    }

    /// Writes `statements` as one complete document.
    ///
    /// The sink is flushed before returning, whether or not writing
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error naming the format if a term cannot be encoded or
    /// the sink fails. Output written before the failure stays in the sink.
    pub fn serialize(&mut self, statements: &StatementSet) -> Result<()> {
        tracing::debug!(
            format = %self.format,
            statements = statements.len(),
            "serializing statements"
        );
        let written = if self.format.is_compact() {
            compact::write(&mut self.output, statements, self.format, &self.options)
        } else {
            line::write(&mut self.output, statements, self.format, &self.options)
        };
        let flushed = self.output.flush().map_err(ErrorKind::from);
        written
            .and(flushed)
            .map_err(|kind| kind.in_format(self.format))
    }

    /// Flushes the buffer and returns the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        let format = self.format;
        self.output
            .into_inner()
            .map_err(|err| ErrorKind::Io(err.into_error()).in_format(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Iri, Statement};

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
    }

    fn sample() -> StatementSet {
        let mut set = StatementSet::new();
        set.insert(Statement::new(
            Iri::new("http://ex.org/s"),
            Iri::new("http://ex.org/p"),
            "v",
        ));
        set
    }

    #[test]
    fn test_io_failure_is_reported_with_format() {
        let mut serializer = Serializer::with_defaults(FailingWriter, Format::NTriples);
        let err = serializer.serialize(&sample()).unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.format(), Format::NTriples);
    }

    #[test]
    fn test_serializer_reuse() {
        let mut serializer = Serializer::with_defaults(Vec::new(), Format::NTriples);
        serializer.serialize(&sample()).unwrap();
        serializer.serialize(&sample()).unwrap();
        let text = String::from_utf8(serializer.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_partial_output_is_flushed_on_error() {
        let mut set = sample();
        set.insert(Statement::new(
            Iri::new("http://ex.org/bad iri"),
            Iri::new("http://ex.org/p"),
            "v",
        ));
        let mut serializer = Serializer::with_defaults(Vec::new(), Format::NTriples);
        let err = serializer.serialize(&set).unwrap_err();
        assert!(err.is_validation());

        let text = String::from_utf8(serializer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "<http://ex.org/s> <http://ex.org/p> \"v\" .\n");
    }
}
