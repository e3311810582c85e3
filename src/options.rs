//! Pipeline options and configuration.

use crate::abbrev::LocatorOptions;
use crate::normalize::CANONICAL_CODES;
use crate::pattern::CodeRule;
use crate::source::ErrorMode;

/// Options for a takeoff run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeoffOptions {
    /// Error handling mode for page text extraction
    pub error_mode: ErrorMode,

    /// Fold typographic marks in page text before scanning
    pub clean_text: bool,

    /// Code extraction rules, tried in order
    pub code_rules: Vec<CodeRule>,

    /// Abbreviation block lookup
    pub locator: LocatorOptions,

    /// Codes the normalizer is asked to cover
    pub canonical_codes: Vec<String>,
}

impl TakeoffOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on any page whose text cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Skip unreadable pages (the default).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable text cleanup.
    pub fn with_text_cleanup(mut self, clean: bool) -> Self {
        self.clean_text = clean;
        self
    }

    /// Replace the code extraction rules.
    pub fn with_code_rules(mut self, rules: impl Into<Vec<CodeRule>>) -> Self {
        self.code_rules = rules.into();
        self
    }

    /// Set abbreviation block lookup options.
    pub fn with_locator(mut self, locator: LocatorOptions) -> Self {
        self.locator = locator;
        self
    }

    /// Replace the canonical code list sent to the normalizer.
    pub fn with_canonical_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.canonical_codes = codes.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for TakeoffOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            clean_text: true,
            code_rules: CodeRule::standard(),
            locator: LocatorOptions::default(),
            canonical_codes: CANONICAL_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}
