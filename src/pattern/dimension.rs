//! Feet/inches dimension tokens.

use once_cell::sync::Lazy;
use regex::Regex;

/// `N'-N N/D"` (with fractional inches) or `N'-N"`.
static DIMENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\d+'\s*-\s*\d+\s*\d*/\d+"|\d+'\s*-\s*\d+""#).expect("valid dimension pattern")
});

/// First dimension token in `line`.
pub fn first_dimension(line: &str) -> Option<&str> {
    DIMENSION.find(line).map(|m| m.as_str())
}
