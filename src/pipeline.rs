//! Takeoff pipeline driver.
//!
//! Runs the stages over one document, in page order:
//! scan callouts, locate and refine the abbreviation block, optionally
//! normalize the dictionary, then resolve and group the records.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::abbrev::{locate_block, refine};
use crate::aggregate::aggregate;
use crate::cleanup::clean_page_text;
use crate::diagnostics::{Diagnostic, Diagnostics, LogDiagnostics};
use crate::error::Result;
use crate::model::{AbbreviationMap, Takeoff, TakeoffStats};
use crate::normalize::Normalizer;
use crate::options::TakeoffOptions;
use crate::pattern::CalloutGrammar;
use crate::scan::CalloutScanner;
use crate::source::{PageSource, PdfSource};

/// One configured extraction pipeline. Reusable across documents.
pub struct Pipeline {
    options: TakeoffOptions,
    scanner: CalloutScanner,
    normalizer: Option<Box<dyn Normalizer>>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Pipeline {
    /// Pipeline with the standard grammar, no normalizer, logging diagnostics.
    pub fn new(options: TakeoffOptions) -> Self {
        Self::with_grammar(options, CalloutGrammar::standard())
    }

    /// Pipeline with a custom callout grammar.
    pub fn with_grammar(options: TakeoffOptions, grammar: CalloutGrammar) -> Self {
        let scanner = CalloutScanner::new(grammar, &options.code_rules);
        Self {
            options,
            scanner,
            normalizer: None,
            diagnostics: Arc::new(LogDiagnostics),
        }
    }

    /// Clean the dictionary with `normalizer` after refinement.
    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    /// Send diagnostics to `sink` instead of the log.
    pub fn with_diagnostics(mut self, sink: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Options in use.
    pub fn options(&self) -> &TakeoffOptions {
        &self.options
    }

    /// Run over a PDF file.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<Takeoff> {
        let source = PdfSource::open(path)?;
        self.run(&source)
    }

    /// Run over an in-memory PDF.
    pub fn run_bytes(&self, data: &[u8]) -> Result<Takeoff> {
        let source = PdfSource::from_bytes(data)?;
        self.run(&source)
    }

    /// Run over any page source.
    pub fn run<S: PageSource + ?Sized>(&self, source: &S) -> Result<Takeoff> {
        self.run_with_stats(source).map(|(takeoff, _)| takeoff)
    }

    /// Run over any page source, also returning summary numbers.
    pub fn run_with_stats<S: PageSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<(Takeoff, TakeoffStats)> {
        let started = Instant::now();
        let pages = source.page_texts(self.options.error_mode, self.diagnostics.as_ref())?;
        Ok(self.process(&pages, started))
    }

    /// Run over page text that is already extracted. Never fails.
    pub fn run_pages<T: AsRef<str>>(&self, pages: &[T]) -> Takeoff {
        self.process(pages, Instant::now()).0
    }

    /// `started` marks when the document was opened; stats time from there.
    fn process<T: AsRef<str>>(&self, pages: &[T], started: Instant) -> (Takeoff, TakeoffStats) {
        let pages: Vec<String> = pages
            .iter()
            .map(|page| {
                if self.options.clean_text {
                    clean_page_text(page.as_ref())
                } else {
                    page.as_ref().to_string()
                }
            })
            .collect();

        let scan = self.scanner.scan(&pages);
        let block = locate_block(&pages, &scan.codes, &self.options.locator);
        if !block.is_found() {
            self.diagnostics.report(Diagnostic::NoAbbreviationBlock);
        }

        let refined = refine(&block.raw, &block.text);
        let (abbreviations, normalized) = self.normalize(refined);

        let record_count = scan.records.len() as u32;
        let items = aggregate(scan.records, &abbreviations);

        let stats = TakeoffStats {
            page_count: pages.len() as u32,
            record_count,
            item_count: items.len() as u32,
            abbreviation_count: abbreviations.len() as u32,
            normalized,
            elapsed_ms: started.elapsed().as_millis(),
        };
        log::info!(
            "Parsed {} pages in {}ms: {} unique items, {} abbreviations",
            stats.page_count,
            stats.elapsed_ms,
            stats.item_count,
            stats.abbreviation_count
        );

        (Takeoff::new(abbreviations, items), stats)
    }

    /// Replace the refined map with the normalizer's output when it succeeds.
    fn normalize(&self, refined: AbbreviationMap) -> (AbbreviationMap, bool) {
        let Some(ref normalizer) = self.normalizer else {
            return (refined, false);
        };

        let canonical: Vec<&str> = self
            .options
            .canonical_codes
            .iter()
            .map(String::as_str)
            .collect();
        match normalizer.normalize(&refined, &canonical) {
            Ok(cleaned) => (cleaned, true),
            Err(e) => {
                self.diagnostics.report(Diagnostic::NormalizationFailed(e));
                (refined, false)
            }
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(TakeoffOptions::default())
    }
}
