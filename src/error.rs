//! Error types for RDF text serialization.
//!
//! Every failure reaches the caller as a single [`Error`] that names the
//! target [`Format`] and wraps the originating [`ErrorKind`]:
//!
//! - **I/O errors**: the output sink rejected a write or a flush
//! - **Invalid data**: a term cannot be expressed in the target syntax at all
//!   (malformed language tag, illegal blank node label, bad prefix label)
//! - **Validation errors**: strict-mode rules were violated (illegal IRI
//!   characters, language tag / datatype mismatch)
//!
//! Serialization is streamed, so an error raised partway through leaves the
//! already written part of the document in the sink. Nothing is retried.
//!
//! ## Examples
//!
//! ```rust
//! use rdf_text::{to_string_with_options, Format, Iri, SerializationOptions, Statement, StatementSet};
//!
//! let mut set = StatementSet::new();
//! set.insert(Statement::new(
//!     Iri::new("http://example.org/has space"),
//!     Iri::new("http://example.org/p"),
//!     Iri::new("http://example.org/o"),
//! ));
//!
//! let options = SerializationOptions::ntriples();
//! let err = to_string_with_options(&set, Format::NTriples, options).unwrap_err();
//! assert!(err.is_validation());
//! assert!(err.to_string().contains("N-Triples"));
//! ```

use crate::Format;
use std::io;
use thiserror::Error;

/// A serialization failure, tagged with the format that was being written.
#[derive(Debug, Error)]
#[error("{format} serialization failed: {kind}")]
pub struct Error {
    format: Format,
    #[source]
    kind: ErrorKind,
}

/// The originating cause of an [`Error`].
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The output sink could not be written to or flushed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A term that has no representation in the target syntax
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A strict-mode rule was violated
    #[error("validation failed: {0}")]
    Validation(String),
}

impl Error {
    /// Wraps a cause with the format being written.
    pub fn new(format: Format, kind: ErrorKind) -> Self {
        Error { format, kind }
    }

    /// The format that was being written when the error occurred.
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub fn is_io(&self) -> bool {
        matches!(self.kind, ErrorKind::Io(_))
    }

    pub fn is_invalid_data(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidData(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }
}

impl ErrorKind {
    /// Creates an invalid data error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdf_text::ErrorKind;
    ///
    /// let err = ErrorKind::invalid_data("malformed language tag 'en_'");
    /// assert!(err.to_string().contains("en_"));
    /// ```
    pub fn invalid_data<T: std::fmt::Display>(msg: T) -> Self {
        ErrorKind::InvalidData(msg.to_string())
    }

    /// Creates a strict-mode validation error.
    pub fn validation<T: std::fmt::Display>(msg: T) -> Self {
        ErrorKind::Validation(msg.to_string())
    }

    /// Attaches the format being written, producing the public error.
    pub fn in_format(self, format: Format) -> Error {
        Error::new(format, self)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Result type used inside the engine before the format is attached.
pub(crate) type EncodeResult<T> = std::result::Result<T, ErrorKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_names_format_and_cause() {
        let err = ErrorKind::validation("IRI contains a space").in_format(Format::Turtle);
        let msg = err.to_string();
        assert!(msg.starts_with("Turtle serialization failed"));
        assert!(msg.contains("IRI contains a space"));
    }

    #[test]
    fn test_source_is_kind() {
        let err = Error::new(
            Format::NQuads,
            ErrorKind::Io(io::Error::new(io::ErrorKind::BrokenPipe, "closed")),
        );
        assert!(err.is_io());
        assert!(err.source().is_some());
        assert_eq!(err.format(), Format::NQuads);
    }

    #[test]
    fn test_io_conversion() {
        let kind: ErrorKind = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(kind, ErrorKind::Io(_)));
    }
}
