//! Token grammars for drawing callouts.
//!
//! Each drawing convention is a recognizer object. A [`CalloutGrammar`]
//! holds recognizers in priority order and tokenizes a line into
//! non-overlapping callouts; [`CodeRecognizer`]s then pull the abbreviation
//! code out of a matched callout.

mod callout;
mod code;
mod dimension;

pub use callout::{DiameterRecognizer, SpecRefRecognizer};
pub use code::{CodeRule, DashPrefixCode, DiameterCode};
pub use dimension::first_dimension;

/// Which callout convention produced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `CODE-N`, e.g. `HUH-13`
    SpecRef,
    /// `<fraction>"ø CODE`, e.g. `3/4"ø CWS`
    Diameter,
}

/// A callout matched in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    pub kind: TokenKind,
    pub text: &'t str,
    /// Byte offset of the match in the line
    pub start: usize,
    /// Byte offset one past the match
    pub end: usize,
}

/// Recognizes one callout convention.
pub trait TokenRecognizer: Send + Sync {
    /// Convention produced by this recognizer.
    fn kind(&self) -> TokenKind;

    /// First match starting at or after byte offset `start`.
    fn find_at<'t>(&self, line: &'t str, start: usize) -> Option<Token<'t>>;
}

/// Extracts an abbreviation code from a matched callout.
pub trait CodeRecognizer: Send + Sync {
    /// The code carried by `token`, if this rule applies.
    fn code(&self, token: &Token<'_>) -> Option<String>;
}

/// Ordered set of callout recognizers.
pub struct CalloutGrammar {
    recognizers: Vec<Box<dyn TokenRecognizer>>,
}

impl CalloutGrammar {
    /// Grammar without any recognizers.
    pub fn empty() -> Self {
        Self {
            recognizers: Vec::new(),
        }
    }

    /// Spec-referenced form first, then the diameter-annotated form.
    pub fn standard() -> Self {
        Self::empty()
            .with_recognizer(SpecRefRecognizer)
            .with_recognizer(DiameterRecognizer)
    }

    /// Append a recognizer with the lowest priority so far.
    pub fn with_recognizer(mut self, recognizer: impl TokenRecognizer + 'static) -> Self {
        self.recognizers.push(Box::new(recognizer));
        self
    }

    /// Number of recognizers.
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    /// Check if the grammar has no recognizers.
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// All non-overlapping callouts in `line`, left to right.
    ///
    /// At each position the leftmost match wins; when two recognizers match
    /// at the same offset the one registered first wins.
    pub fn tokens<'t>(&self, line: &'t str) -> Vec<Token<'t>> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos <= line.len() {
            let mut best: Option<Token<'t>> = None;
            for recognizer in &self.recognizers {
                if let Some(token) = recognizer.find_at(line, pos) {
                    if best.map_or(true, |b| token.start < b.start) {
                        best = Some(token);
                    }
                }
            }

            let Some(token) = best else { break };
            pos = if token.end > token.start {
                token.end
            } else {
                next_char_boundary(line, token.end)
            };
            tokens.push(token);
        }

        tokens
    }
}

impl Default for CalloutGrammar {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for CalloutGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<TokenKind> = self.recognizers.iter().map(|r| r.kind()).collect();
        f.debug_struct("CalloutGrammar")
            .field("recognizers", &kinds)
            .finish()
    }
}

fn next_char_boundary(s: &str, from: usize) -> usize {
    let mut idx = from + 1;
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'t>(tokens: &[Token<'t>]) -> Vec<&'t str> {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokens_both_forms() {
        let grammar = CalloutGrammar::standard();
        let tokens = grammar.tokens("HUH-13 TO 3/4\"ø CWS BELOW");
        assert_eq!(texts(&tokens), vec!["HUH-13", "3/4\"ø CWS"]);
        assert_eq!(tokens[0].kind, TokenKind::SpecRef);
        assert_eq!(tokens[1].kind, TokenKind::Diameter);
    }

    #[test]
    fn test_tokens_do_not_overlap() {
        let grammar = CalloutGrammar::standard();
        // The diameter form starts first and swallows the code, so the
        // trailing `HUH-13` is not counted again.
        let tokens = grammar.tokens("2\"ø HUH-13");
        assert_eq!(texts(&tokens), vec!["2\"ø HUH"]);
    }

    #[test]
    fn test_tokens_none() {
        let grammar = CalloutGrammar::standard();
        assert!(grammar.tokens("GENERAL NOTES").is_empty());
        assert!(grammar.tokens("").is_empty());
    }

    #[test]
    fn test_priority_breaks_ties() {
        struct Everything;
        impl TokenRecognizer for Everything {
            fn kind(&self) -> TokenKind {
                TokenKind::Diameter
            }
            fn find_at<'t>(&self, line: &'t str, start: usize) -> Option<Token<'t>> {
                (start < line.len()).then(|| Token {
                    kind: TokenKind::Diameter,
                    text: &line[start..],
                    start,
                    end: line.len(),
                })
            }
        }

        let grammar = CalloutGrammar::empty()
            .with_recognizer(SpecRefRecognizer)
            .with_recognizer(Everything);
        let tokens = grammar.tokens("HUH-13");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::SpecRef);
    }

    #[test]
    fn test_empty_grammar() {
        let grammar = CalloutGrammar::empty();
        assert!(grammar.is_empty());
        assert!(grammar.tokens("HUH-13").is_empty());
    }
}
