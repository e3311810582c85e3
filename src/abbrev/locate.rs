//! Abbreviation block locator.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{AbbreviationMap, CodeSet};

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bABBREVIATIONS?\b").expect("valid header pattern"));

/// Options for finding the abbreviation block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Line prefixes that end the block early (matched case-insensitively),
    /// e.g. a title-block footer such as `SHEET`.
    pub terminators: Vec<String>,
}

impl LocatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line prefix that ends the block.
    pub fn with_terminator(mut self, prefix: impl Into<String>) -> Self {
        self.terminators.push(prefix.into().to_uppercase());
        self
    }

    fn is_terminator(&self, line: &str) -> bool {
        if self.terminators.is_empty() {
            return false;
        }
        let upper = line.to_uppercase();
        self.terminators
            .iter()
            .any(|t| upper.starts_with(&t.to_uppercase()))
    }
}

/// The captured abbreviation block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationBlock {
    /// Every known code mapped to the whole block text (or "" if none)
    pub raw: AbbreviationMap,

    /// Block lines, trimmed and joined with single spaces
    pub text: String,

    /// Page the header was found on (1-indexed)
    pub page: Option<u32>,
}

impl AbbreviationBlock {
    /// Whether a header was found.
    pub fn is_found(&self) -> bool {
        self.page.is_some()
    }
}

/// Find the first abbreviations header and capture the block under it.
///
/// Only the first page carrying a header is used. The block runs from the
/// line after the header to the first blank line (or terminator line).
pub fn locate_block<S: AsRef<str>>(
    pages: &[S],
    codes: &CodeSet,
    options: &LocatorOptions,
) -> AbbreviationBlock {
    let mut block = AbbreviationBlock {
        raw: codes.iter().map(|c| (c.clone(), String::new())).collect(),
        ..Default::default()
    };

    for (idx, text) in pages.iter().enumerate() {
        let lines: Vec<&str> = text.as_ref().lines().collect();
        let Some(header) = lines.iter().position(|line| HEADER.is_match(line)) else {
            continue;
        };

        let mut collected = Vec::new();
        for line in &lines[header + 1..] {
            let line = line.trim();
            if line.is_empty() || options.is_terminator(line) {
                break;
            }
            collected.push(line);
        }

        block.text = collected.join(" ");
        block.page = Some(idx as u32 + 1);
        for value in block.raw.values_mut() {
            value.clone_from(&block.text);
        }

        log::debug!(
            "Abbreviation block on page {}: {} lines",
            idx + 1,
            collected.len()
        );
        break;
    }

    block
}
