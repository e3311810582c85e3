//! Abbreviation code extraction from matched callouts.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{CodeRecognizer, Token};

/// Diameter sign immediately followed by the code.
static DIAMETER_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ø\s*([A-Z]{2,5}R?)\b").expect("valid diameter code pattern"));

/// Leading letters of a `CODE-N` callout.
static DASH_PREFIX_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{2,5}R?)-").expect("valid dash prefix pattern"));

/// Code following a diameter marker, e.g. `HUH` in `2"ø HUH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiameterCode;

impl CodeRecognizer for DiameterCode {
    fn code(&self, token: &Token<'_>) -> Option<String> {
        DIAMETER_CODE
            .captures(token.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Letters before the dash of a spec-referenced callout, e.g. `HUH` in `HUH-13`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashPrefixCode;

impl CodeRecognizer for DashPrefixCode {
    fn code(&self, token: &Token<'_>) -> Option<String> {
        DASH_PREFIX_CODE
            .captures(token.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Selectable code extraction rules, tried in the configured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeRule {
    /// Code after a `ø` diameter marker
    Diameter,
    /// Leading letters of a dash-delimited callout
    DashPrefix,
}

impl CodeRule {
    /// Diameter marker first, dash prefix as the fallback.
    pub fn standard() -> Vec<CodeRule> {
        vec![CodeRule::Diameter, CodeRule::DashPrefix]
    }

    /// Build the recognizer for this rule.
    pub fn recognizer(self) -> Box<dyn CodeRecognizer> {
        match self {
            CodeRule::Diameter => Box::new(DiameterCode),
            CodeRule::DashPrefix => Box::new(DashPrefixCode),
        }
    }
}
