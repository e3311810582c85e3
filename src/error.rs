//! Error types for the takeoff library.

use std::io;
use thiserror::Error;

/// Result type alias for takeoff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors of a takeoff run.
///
/// Everything here means the source document could not be read or the
/// result could not be written. Recoverable conditions (missing
/// abbreviation block, normalizer failures, unknown codes) never surface
/// as an `Error`; see [`crate::diagnostics::Diagnostic`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Text could not be extracted from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error while serializing the takeoff output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error means the source document itself is unreadable.
    pub fn is_document_unreadable(&self) -> bool {
        !matches!(self, Error::Render(_))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
