//! Parallel processing of independent documents.
//!
//! Each document gets its own pipeline run; pages of one document are
//! still processed in order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Takeoff;
use crate::options::TakeoffOptions;
use crate::pipeline::Pipeline;

/// Outcome for one input file.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub result: Result<Takeoff>,
}

/// Run the pipeline over many PDF files in parallel.
///
/// Results come back in input order. Failures are per file; one unreadable
/// document does not stop the others. No normalizer is used.
pub fn run_files<P>(paths: &[P], options: &TakeoffOptions) -> Vec<BatchEntry>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let pipeline = Pipeline::new(options.clone());
            let result = pipeline.run_file(path);
            if let Err(ref e) = result {
                log::warn!("Skipping {}: {}", path.display(), e);
            }
            BatchEntry {
                path: path.to_path_buf(),
                result,
            }
        })
        .collect()
}

/// Run the pipeline over many already-extracted documents in parallel.
pub fn run_texts<T>(documents: &[Vec<T>], options: &TakeoffOptions) -> Vec<Takeoff>
where
    T: AsRef<str> + Sync,
{
    documents
        .par_iter()
        .map(|pages| Pipeline::new(options.clone()).run_pages(pages))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_texts_keeps_order() {
        let docs = vec![
            vec!["HUH-1"],
            vec!["CWS-1 CWS-1", "ABBREVIATIONS\nCWS Cold Water Supply"],
        ];
        let results = run_texts(&docs, &TakeoffOptions::default());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].items[0].callout, "HUH-1");
        assert_eq!(results[1].items[0].quantity, 2);
        assert_eq!(results[1].abbreviations["CWS"], "Cold Water Supply");
    }

    #[test]
    fn test_run_files_reports_failures_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("notes.pdf");
        std::fs::write(&bogus, "not a pdf").unwrap();
        let missing = dir.path().join("missing.pdf");

        let entries = run_files(&[bogus.clone(), missing.clone()], &TakeoffOptions::default());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, bogus);
        assert!(entries[0].result.is_err());
        assert_eq!(entries[1].path, missing);
        assert!(entries[1].result.is_err());
    }
}
