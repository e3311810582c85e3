//! Diagnostics sink for recoverable conditions.
//!
//! The pipeline never fails for a missing abbreviation block, an
//! unreachable normalizer or an unreadable page in lenient mode. Those
//! conditions are reported to a [`Diagnostics`] sink handed to the
//! pipeline, so callers choose whether they are logged, collected or
//! ignored.

use std::fmt;
use std::sync::Mutex;

use crate::normalize::NormalizeError;

/// A recoverable condition observed during a run.
#[derive(Debug)]
pub enum Diagnostic {
    /// No page carried an abbreviations header; every code resolves to "".
    NoAbbreviationBlock,

    /// The normalizer failed; the refined dictionary was kept.
    NormalizationFailed(NormalizeError),

    /// Text of a page could not be extracted and was treated as empty.
    PageTextUnavailable { page: u32, reason: String },
}

impl Diagnostic {
    /// Log level this diagnostic deserves.
    pub fn level(&self) -> log::Level {
        match self {
            Diagnostic::NoAbbreviationBlock => log::Level::Info,
            Diagnostic::NormalizationFailed(_) | Diagnostic::PageTextUnavailable { .. } => {
                log::Level::Warn
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoAbbreviationBlock => {
                write!(f, "no abbreviation block found; descriptions left empty")
            }
            Diagnostic::NormalizationFailed(err) => {
                write!(f, "abbreviation normalization failed, keeping refined map: {}", err)
            }
            Diagnostic::PageTextUnavailable { page, reason } => {
                write!(f, "failed to extract text from page {}: {}", page, reason)
            }
        }
    }
}

/// Receives diagnostics from a pipeline run.
pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        log::log!(diagnostic.level(), "{}", diagnostic);
    }
}

/// Keeps diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything reported so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Number of diagnostics currently held.
    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn report(&self, _diagnostic: Diagnostic) {}
}
