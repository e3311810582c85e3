//! PDF header sniffing.
//!
//! Drawing sets arrive as arbitrary uploads; refuse anything that does not
//! carry a `%PDF-x.y` header before handing it to the PDF loader.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"
const HEADER_LEN: u64 = 16;

/// Check the header of a file on disk and return its PDF version.
pub fn sniff_pdf_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    File::open(path)?.take(HEADER_LEN).read_to_end(&mut header)?;
    sniff_pdf(&header)
}

/// Check the leading bytes of a buffer and return its PDF version.
pub fn sniff_pdf(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let start = PDF_MAGIC.len();
    let version = String::from_utf8_lossy(&data[start..start + VERSION_LEN]).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(version)
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_valid_pdf() {
        assert_eq!(sniff_pdf(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap(), "1.7");
        assert_eq!(sniff_pdf(b"%PDF-2.0\n").unwrap(), "2.0");
    }

    #[test]
    fn test_sniff_rejects_other_formats() {
        assert!(matches!(sniff_pdf(b"<!DOCTYPE html>"), Err(Error::UnknownFormat)));
        assert!(matches!(sniff_pdf(b"%PDF"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_sniff_bad_version() {
        assert!(matches!(
            sniff_pdf(b"%PDF-x.y\n"),
            Err(Error::UnsupportedVersion(v)) if v == "x.y"
        ));
    }

    #[test]
    fn test_sniff_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.pdf");
        std::fs::write(&path, b"%PD").unwrap();
        assert!(matches!(sniff_pdf_file(&path), Err(Error::UnknownFormat)));
    }
}
