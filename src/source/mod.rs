//! Page text sources.
//!
//! The pipeline only needs per-page plain text in reading order. A
//! [`PageSource`] provides it; [`PdfSource`] reads it out of a PDF with
//! lopdf, rebuilding lines from text positions, and plain string collections work as in-memory sources.

mod layout;
mod pdf;

pub use pdf::PdfSource;

use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// Error handling mode during text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page that cannot be extracted
    Strict,
    /// Treat unreadable pages as empty and report a diagnostic
    #[default]
    Lenient,
}

/// Something that yields page text in page order.
pub trait PageSource {
    /// Text of every page, first page first.
    fn page_texts(&self, mode: ErrorMode, diagnostics: &dyn Diagnostics) -> Result<Vec<String>>;
}

impl PageSource for [String] {
    fn page_texts(&self, _mode: ErrorMode, _diagnostics: &dyn Diagnostics) -> Result<Vec<String>> {
        Ok(self.to_vec())
    }
}

impl PageSource for Vec<String> {
    fn page_texts(&self, mode: ErrorMode, diagnostics: &dyn Diagnostics) -> Result<Vec<String>> {
        self.as_slice().page_texts(mode, diagnostics)
    }
}

impl PageSource for [&str] {
    fn page_texts(&self, _mode: ErrorMode, _diagnostics: &dyn Diagnostics) -> Result<Vec<String>> {
        Ok(self.iter().map(|s| s.to_string()).collect())
    }
}

impl PageSource for Vec<&str> {
    fn page_texts(&self, mode: ErrorMode, diagnostics: &dyn Diagnostics) -> Result<Vec<String>> {
        self.as_slice().page_texts(mode, diagnostics)
    }
}

impl<const N: usize> PageSource for [&str; N] {
    fn page_texts(&self, mode: ErrorMode, diagnostics: &dyn Diagnostics) -> Result<Vec<String>> {
        self.as_slice().page_texts(mode, diagnostics)
    }
}
