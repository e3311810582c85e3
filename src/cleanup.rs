//! Page text cleanup ahead of scanning.
//!
//! PDF text layers spell inch/foot marks and the diameter sign in several
//! ways. The callout and dimension grammars expect ASCII `'`/`"` and `ø`,
//! so fold the common variants before scanning.

use unicode_normalization::UnicodeNormalization;

/// Characters folded to the forms the grammars expect.
const FOLD_MAP: &[(char, &str)] = &[
    ('\u{2032}', "'"),  // ′ prime
    ('\u{2019}', "'"),  // ’
    ('\u{2018}', "'"),  // ‘
    ('\u{2033}', "\""), // ″ double prime
    ('\u{201C}', "\""), // “
    ('\u{201D}', "\""), // ”
    ('\u{00D8}', "ø"),  // Ø
    ('\u{2300}', "ø"),  // ⌀ diameter sign
    ('\u{00A0}', " "),  // no-break space
    ('\u{2010}', "-"),  // hyphen
    ('\u{2011}', "-"),  // non-breaking hyphen
    ('\u{2013}', "-"),  // en dash
    ('\u{FB01}', "fi"), // ﬁ
    ('\u{FB02}', "fl"), // ﬂ
];

/// Normalize one page of extracted text.
pub fn clean_page_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let mut out = String::with_capacity(composed.len());
    for c in composed.chars() {
        match FOLD_MAP.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}
