//! Callout scanning over page text.

use crate::model::{CodeSet, ItemRecord};
use crate::pattern::{first_dimension, CalloutGrammar, CodeRecognizer, CodeRule, Token};

/// Raw scanner output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    /// One record per callout match, in page, line, match order
    pub records: Vec<ItemRecord>,

    /// Distinct codes seen in any record
    pub codes: CodeSet,
}

/// Walks page lines and turns callout matches into [`ItemRecord`]s.
pub struct CalloutScanner {
    grammar: CalloutGrammar,
    code_rules: Vec<CodeRule>,
    code_recognizers: Vec<Box<dyn CodeRecognizer>>,
}

impl CalloutScanner {
    /// Scanner with the given grammar and code rules (tried in order).
    pub fn new(grammar: CalloutGrammar, code_rules: &[CodeRule]) -> Self {
        Self {
            grammar,
            code_rules: code_rules.to_vec(),
            code_recognizers: code_rules.iter().map(|rule| rule.recognizer()).collect(),
        }
    }

    /// Code rules in the order they are tried.
    pub fn code_rules(&self) -> &[CodeRule] {
        &self.code_rules
    }

    /// Scan pages in order; page numbers are 1-based.
    pub fn scan<S: AsRef<str>>(&self, pages: &[S]) -> ScanOutput {
        let mut output = ScanOutput::default();

        for (idx, text) in pages.iter().enumerate() {
            let page = idx as u32 + 1;
            for line in text.as_ref().lines() {
                self.scan_line(page, line, &mut output);
            }
        }

        log::debug!(
            "Scanned {} pages: {} callouts, {} distinct codes",
            pages.len(),
            output.records.len(),
            output.codes.len()
        );
        output
    }

    fn scan_line(&self, page: u32, line: &str, output: &mut ScanOutput) {
        let tokens = self.grammar.tokens(line);
        if tokens.is_empty() {
            return;
        }

        let dimension = first_dimension(line).map(str::to_string);
        for token in tokens {
            let code = self.code_for(&token);
            if let Some(ref code) = code {
                output.codes.insert(code.clone());
            }
            output.records.push(
                ItemRecord::new(page, token.text)
                    .with_code(code)
                    .with_dimension(dimension.clone()),
            );
        }
    }

    fn code_for(&self, token: &Token<'_>) -> Option<String> {
        self.code_recognizers
            .iter()
            .find_map(|recognizer| recognizer.code(token))
    }
}

impl Default for CalloutScanner {
    fn default() -> Self {
        Self::new(CalloutGrammar::standard(), &CodeRule::standard())
    }
}

impl std::fmt::Debug for CalloutScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalloutScanner")
            .field("grammar", &self.grammar)
            .field("code_rules", &self.code_rules)
            .finish()
    }
}
