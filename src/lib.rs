//! # takeoff
//!
//! Callout takeoff extraction from engineering-drawing PDFs.
//!
//! The library reads the text layer of a drawing set, recognizes equipment
//! callouts (`HUH-13`, `3/4"ø CWS`) with their dimensions, finds the
//! sheet's abbreviations table and resolves every callout code against it,
//! then counts identical callouts per page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use takeoff::{extract_file, render};
//!
//! fn main() -> takeoff::Result<()> {
//!     let result = extract_file("mechanical-plans.pdf")?;
//!     for item in &result.items {
//!         println!("p{} {} x{}", item.page, item.callout, item.quantity);
//!     }
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Stages
//!
//! - [`scan`]: callout and dimension recognition per line
//! - [`abbrev`]: abbreviation block lookup and boundary refinement
//! - [`normalize`]: optional cleanup of the dictionary by an external service
//! - [`aggregate`]: description resolution and grouping by `(page, callout)`
//! - [`pipeline`]: runs the stages over one document

pub mod abbrev;
pub mod aggregate;
pub mod batch;
pub mod cleanup;
pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod normalize;
pub mod options;
pub mod pattern;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod source;

// Re-export commonly used types
pub use diagnostics::{CollectedDiagnostics, Diagnostic, Diagnostics, LogDiagnostics};
pub use error::{Error, Result};
pub use model::{AbbreviationMap, GroupedItem, ItemRecord, Takeoff, TakeoffStats};
pub use normalize::{ChatNormalizer, NormalizeError, Normalizer, NormalizerConfig};
pub use options::TakeoffOptions;
pub use pipeline::Pipeline;
pub use render::JsonFormat;
pub use source::{ErrorMode, PageSource, PdfSource};

use std::path::Path;

/// Extract a takeoff from a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// let result = takeoff::extract_file("plumbing.pdf").unwrap();
/// println!("{} items", result.items.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Takeoff> {
    Pipeline::default().run_file(path)
}

/// Extract a takeoff from a PDF file with custom options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: TakeoffOptions,
) -> Result<Takeoff> {
    Pipeline::new(options).run_file(path)
}

/// Extract a takeoff from an in-memory PDF.
pub fn extract_bytes(data: &[u8]) -> Result<Takeoff> {
    Pipeline::default().run_bytes(data)
}

/// Extract a takeoff from page text that is already available.
///
/// # Example
///
/// ```
/// let pages = ["2\"ø HUH", "ABBREVIATIONS\nHUH Heating Unit Heater"];
/// let result = takeoff::extract_pages(&pages);
/// assert_eq!(result.abbreviations["HUH"], "Heating Unit Heater");
/// ```
pub fn extract_pages<T: AsRef<str>>(pages: &[T]) -> Takeoff {
    Pipeline::default().run_pages(pages)
}
