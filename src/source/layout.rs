//! Line reconstruction for PDF pages.
//!
//! Drawing text is usually placed one run at a time with `Td`/`Tm`, so the
//! content stream carries no line breaks. Runs are collected with their
//! baseline position, grouped into lines by baseline, and emitted top to
//! bottom with one `\n` per line. A vertical gap of more than
//! [`PARAGRAPH_GAP`] line heights becomes an empty line.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Encoding, Object, ObjectId};

use crate::error::{Error, Result};

/// Baseline distance, in font sizes, above which a blank line is emitted.
const PARAGRAPH_GAP: f32 = 2.0;

/// `TJ` adjustment (thousandths of an em) treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A run of text at a baseline position.
#[derive(Debug, Clone)]
pub(crate) struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// Spans sharing a baseline, left to right.
#[derive(Debug, Clone)]
pub(crate) struct TextLine {
    spans: Vec<TextSpan>,
    y: f32,
    font_size: f32,
}

impl TextLine {
    fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        let y = spans.first().map_or(0.0, |s| s.y);
        let font_size = spans.iter().map(|s| s.font_size).fold(0.0, f32::max);
        Self { spans, y, font_size }
    }

    /// Span texts joined, with a space wherever the next span starts further right.
    pub fn text(&self) -> String {
        let mut result = String::new();
        let mut prev: Option<&TextSpan> = None;

        for span in &self.spans {
            if let Some(prev) = prev {
                let advanced = span.x - prev.x > span.font_size * 0.1;
                let spaced = result.ends_with(char::is_whitespace)
                    || span.text.starts_with(char::is_whitespace);
                if advanced && !spaced {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
            prev = Some(span);
        }

        result
    }
}

/// Text of one page, one line per baseline.
pub(crate) fn page_text(doc: &LopdfDocument, page_id: ObjectId) -> Result<String> {
    let spans = page_spans(doc, page_id)?;
    let lines = group_spans_into_lines(spans);
    Ok(lines_to_text(&lines))
}

/// Collect positioned text spans from a page's content stream.
fn page_spans(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<TextSpan>> {
    // Fonts only affect decoding; a page without usable resources still has text.
    let fonts = doc.get_page_fonts(page_id).unwrap_or_else(|e| {
        log::debug!("No fonts for page object {:?}: {}", page_id, e);
        BTreeMap::new()
    });
    let encodings: BTreeMap<Vec<u8>, Encoding> = fonts
        .into_iter()
        .filter_map(|(name, font)| font.get_font_encoding(doc).ok().map(|enc| (name, enc)))
        .collect();

    let content = page_content(doc, page_id)?;
    parse_content_stream(&content, &encodings)
}

/// Concatenated, decompressed content streams of a page.
fn page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::TextExtract(e.to_string()))?;

    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents,
        // A page with no content stream is blank.
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(r) => match doc.get_object(*r) {
            Ok(Object::Stream(s)) => Ok(s
                .decompressed_content()
                .unwrap_or_else(|_| s.content.clone())),
            _ => Err(Error::TextExtract("Invalid content stream".to_string())),
        },
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        match s.decompressed_content() {
                            Ok(data) => content.extend_from_slice(&data),
                            Err(_) => content.extend_from_slice(&s.content),
                        }
                        content.push(b' ');
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::TextExtract("Invalid content stream".to_string())),
    }
}

fn parse_content_stream(
    content: &[u8],
    encodings: &BTreeMap<Vec<u8>, Encoding>,
) -> Result<Vec<TextSpan>> {
    let content = Content::decode(content).map_err(|e| Error::TextExtract(e.to_string()))?;

    let mut spans = Vec::new();
    let mut font_name: Vec<u8> = Vec::new();
    let mut font_size: f32 = 12.0;
    let mut matrix = TextMatrix::default();
    let mut in_text_block = false;

    // TODO: descend into form XObjects (`Do`) so text placed inside title
    // blocks and symbols is read as well.
    for op in content.operations {
        let text = match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix = TextMatrix::default();
                None
            }
            "ET" => {
                in_text_block = false;
                None
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(name) = &op.operands[0] {
                        font_name = name.clone();
                    }
                    font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                }
                None
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(get_number) {
                    matrix.leading = Some(leading);
                }
                None
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        matrix.leading = Some(-ty);
                    }
                    matrix.translate(tx, ty);
                }
                None
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        get_number(&op.operands[0]).unwrap_or(1.0),
                        get_number(&op.operands[1]).unwrap_or(0.0),
                        get_number(&op.operands[2]).unwrap_or(0.0),
                        get_number(&op.operands[3]).unwrap_or(1.0),
                        get_number(&op.operands[4]).unwrap_or(0.0),
                        get_number(&op.operands[5]).unwrap_or(0.0),
                    );
                }
                None
            }
            "T*" => {
                matrix.next_line(font_size);
                None
            }
            "Tj" => match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(decode(encodings, &font_name, bytes)),
                _ => None,
            },
            "TJ" => match op.operands.first() {
                Some(Object::Array(items)) => {
                    let mut combined = String::new();
                    for item in items {
                        match item {
                            Object::String(bytes, _) => {
                                combined.push_str(&decode(encodings, &font_name, bytes))
                            }
                            Object::Integer(_) | Object::Real(_) => {
                                let adjustment = -get_number(item).unwrap_or(0.0);
                                if adjustment > TJ_SPACE_THRESHOLD
                                    && !combined.is_empty()
                                    && !combined.ends_with(char::is_whitespace)
                                {
                                    combined.push(' ');
                                }
                            }
                            _ => {}
                        }
                    }
                    Some(combined)
                }
                _ => None,
            },
            "'" | "\"" => {
                matrix.next_line(font_size);
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                match op.operands.get(text_idx) {
                    Some(Object::String(bytes, _)) => Some(decode(encodings, &font_name, bytes)),
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(text) = text {
            if in_text_block && !text.trim().is_empty() {
                let (x, y) = matrix.position();
                spans.push(TextSpan {
                    text,
                    x,
                    y,
                    font_size: font_size * matrix.scale(),
                });
            }
        }
    }

    Ok(spans)
}

/// Group spans into lines by baseline, top of the page first.
pub(crate) fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // PDF y grows upwards.
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    lines
}

/// Join lines with `\n`, adding an empty line at paragraph-sized gaps.
pub(crate) fn lines_to_text(lines: &[TextLine]) -> String {
    let mut text = String::new();
    let mut prev: Option<&TextLine> = None;

    for line in lines {
        if let Some(prev) = prev {
            let height = prev.font_size.max(line.font_size).max(1.0);
            if prev.y - line.y > height * PARAGRAPH_GAP {
                text.push('\n');
            }
        }
        text.push_str(&line.text());
        text.push('\n');
        prev = Some(line);
    }

    text
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: Option<f32>,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: None,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, font_size: f32) {
        let leading = self.leading.unwrap_or(font_size * 1.2);
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

fn decode(encodings: &BTreeMap<Vec<u8>, Encoding>, font_name: &[u8], bytes: &[u8]) -> String {
    match encodings.get(font_name) {
        Some(enc) => LopdfDocument::decode_text(enc, bytes).unwrap_or_default(),
        None => decode_text_simple(bytes),
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decoding fallback when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            x,
            y,
            font_size: 10.0,
        }
    }

    #[test]
    fn test_lines_top_to_bottom() {
        let spans = vec![
            span("HUH Heating Unit Heater", 72.0, 600.0),
            span("ABBREVIATIONS", 72.0, 612.0),
            span("HUH-13", 72.0, 700.0),
        ];
        let lines = group_spans_into_lines(spans);
        let texts: Vec<String> = lines.iter().map(TextLine::text).collect();
        assert_eq!(texts, ["HUH-13", "ABBREVIATIONS", "HUH Heating Unit Heater"]);
    }

    #[test]
    fn test_spans_on_one_baseline_joined_with_space() {
        let spans = vec![
            span("Heating Unit Heater", 120.0, 600.0),
            span("HUH", 72.0, 601.0),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "HUH Heating Unit Heater");
    }

    #[test]
    fn test_spans_at_same_x_are_concatenated() {
        let spans = vec![span("HU", 72.0, 600.0), span("H-13", 72.0, 600.0)];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines[0].text(), "HUH-13");
    }

    #[test]
    fn test_large_gap_becomes_blank_line() {
        let spans = vec![
            span("ABBREVIATIONS", 72.0, 700.0),
            span("HUH Heating Unit Heater", 72.0, 688.0),
            span("GENERAL NOTES", 72.0, 600.0),
        ];
        let text = lines_to_text(&group_spans_into_lines(spans));
        assert_eq!(
            text,
            "ABBREVIATIONS\nHUH Heating Unit Heater\n\nGENERAL NOTES\n"
        );
    }

    #[test]
    fn test_content_stream_td_tj_lines() {
        let stream = b"BT /F1 10 Tf 72 700 Td (HUH-13) Tj 0 -12 Td (HUH-13) Tj \
                       0 -12 Td (ABBREVIATIONS) Tj 0 -12 Td (HUH Heating Unit Heater) Tj ET";
        let spans = parse_content_stream(stream, &BTreeMap::new()).unwrap();
        assert_eq!(spans.len(), 4);
        let text = lines_to_text(&group_spans_into_lines(spans));
        assert_eq!(text, "HUH-13\nHUH-13\nABBREVIATIONS\nHUH Heating Unit Heater\n");
    }

    #[test]
    fn test_content_stream_tj_array_and_next_line() {
        let stream = b"BT /F1 10 Tf 14 TL 72 700 Td [(2\"\xf8) -250 (HUH)] TJ T* (3/4\"\xf8 CWS) Tj ET";
        let spans = parse_content_stream(stream, &BTreeMap::new()).unwrap();
        let text = lines_to_text(&group_spans_into_lines(spans));
        assert_eq!(text, "2\"\u{f8} HUH\n3/4\"\u{f8} CWS\n");
    }

    #[test]
    fn test_text_outside_bt_et_ignored() {
        let spans = parse_content_stream(b"(stray) Tj", &BTreeMap::new()).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_decode_text_simple_utf16() {
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0xD8]), "H\u{d8}");
        assert_eq!(decode_text_simple(b"CWS"), "CWS");
    }
}
