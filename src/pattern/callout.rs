//! Callout recognizers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Token, TokenKind, TokenRecognizer};

/// `CODE-N`: 2–5 capitals, optional trailing `R`, a dash and a number.
/// Unanchored: `FCU-2A` yields `FCU-2` and `2HUH-13` yields `HUH-13`.
static SPEC_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]{2,5}R?-\d+").expect("valid spec-ref pattern"));

/// `<fraction>"ø CODE`: a whole or fractional size, inch mark, diameter sign.
static DIAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\d+(?:/\d+)?"ø\s*[A-Z]{2,5}R?\b"#).expect("valid diameter pattern")
});

fn find_with<'t>(re: &Regex, kind: TokenKind, line: &'t str, start: usize) -> Option<Token<'t>> {
    re.find_at(line, start).map(|m| Token {
        kind,
        text: m.as_str(),
        start: m.start(),
        end: m.end(),
    })
}

/// Recognizes spec-referenced callouts such as `HUH-13`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecRefRecognizer;

impl TokenRecognizer for SpecRefRecognizer {
    fn kind(&self) -> TokenKind {
        TokenKind::SpecRef
    }

    fn find_at<'t>(&self, line: &'t str, start: usize) -> Option<Token<'t>> {
        find_with(&SPEC_REF, TokenKind::SpecRef, line, start)
    }
}

/// Recognizes diameter-annotated callouts such as `1/2"ø CWS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiameterRecognizer;

impl TokenRecognizer for DiameterRecognizer {
    fn kind(&self) -> TokenKind {
        TokenKind::Diameter
    }

    fn find_at<'t>(&self, line: &'t str, start: usize) -> Option<Token<'t>> {
        find_with(&DIAMETER, TokenKind::Diameter, line, start)
    }
}
