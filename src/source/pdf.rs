//! PDF page text via lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, ObjectId};

use super::layout;
use super::{ErrorMode, PageSource};
use crate::detect::{sniff_pdf, sniff_pdf_file};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Error, Result};

/// A loaded PDF whose pages can be read as text.
pub struct PdfSource {
    doc: LopdfDocument,
    version: String,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let version = sniff_pdf_file(path)?;
        let doc = LopdfDocument::load(path)?;
        Self::checked(doc, version)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let version = sniff_pdf(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::checked(doc, version)
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn checked(doc: LopdfDocument, version: String) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc, version })
    }

    /// Version from the file header (e.g. "1.7").
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn page_text(&self, page_num: u32, page_id: ObjectId) -> Result<String> {
        layout::page_text(&self.doc, page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }
}

impl PageSource for PdfSource {
    fn page_texts(&self, mode: ErrorMode, diagnostics: &dyn Diagnostics) -> Result<Vec<String>> {
        // Pages from the page tree, in document order; positions in the
        // returned vector are the 1-based page indices used downstream.
        let pages = self.doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());

        for (page_num, page_id) in pages {
            match self.page_text(page_num, page_id) {
                Ok(text) => texts.push(text),
                Err(e) if mode == ErrorMode::Lenient => {
                    diagnostics.report(Diagnostic::PageTextUnavailable {
                        page: page_num,
                        reason: e.to_string(),
                    });
                    texts.push(String::new());
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!("Extracted text from {} pages", texts.len());
        Ok(texts)
    }
}
