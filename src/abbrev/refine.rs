//! Boundary-aware abbreviation refinement.

use regex::Regex;

use crate::model::AbbreviationMap;

/// Cut each code's own definition out of the block text.
///
/// A code's description is the text after its first whole-word occurrence
/// (followed by whitespace) up to the next whole-word occurrence of any
/// known code, or the end of the block. Codes never found fall back to
/// their trimmed `raw` value. A description that itself contains a known
/// code as a word is cut short at that word.
pub fn refine(raw: &AbbreviationMap, text: &str) -> AbbreviationMap {
    let mut codes: Vec<&str> = raw.keys().map(String::as_str).collect();
    // Longer codes first so a code is preferred over its own prefix.
    codes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let fallback = || -> AbbreviationMap {
        raw.iter()
            .map(|(code, value)| (code.clone(), value.trim().to_string()))
            .collect()
    };

    if codes.is_empty() || text.is_empty() {
        return fallback();
    }

    let (boundary, starts) = match build_patterns(&codes) {
        Ok(patterns) => patterns,
        Err(e) => {
            log::warn!("Cannot build abbreviation boundary patterns: {}", e);
            return fallback();
        }
    };

    let mut refined = AbbreviationMap::new();
    for (code, start) in codes.iter().zip(&starts) {
        let description = start
            .find(text)
            .map(|m| {
                let end = boundary
                    .find_at(text, m.end())
                    .map_or(text.len(), |next| next.start());
                text[m.end()..end].trim().to_string()
            })
            .unwrap_or_else(|| raw.get(*code).map_or("", |v| v.as_str()).trim().to_string());
        refined.insert(code.to_string(), description);
    }
    refined
}

/// The any-code boundary pattern, and per code the pattern whose match ends
/// where that code's definition begins.
fn build_patterns(codes: &[&str]) -> Result<(Regex, Vec<Regex>), regex::Error> {
    let alternation = codes
        .iter()
        .map(|c| regex::escape(c))
        .collect::<Vec<_>>()
        .join("|");
    let boundary = Regex::new(&format!(r"\b(?:{})\b", alternation))?;

    let starts = codes
        .iter()
        .map(|c| Regex::new(&format!(r"\b{}\b\s+", regex::escape(c))))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((boundary, starts))
}
