//! Optional abbreviation normalization through an external service.
//!
//! A [`Normalizer`] receives the refined dictionary plus the list of codes
//! the domain expects and returns a replacement dictionary. Failures are
//! typed ([`NormalizeError`]); the pipeline decides what to fall back to.

mod chat;
mod reply;

pub use chat::{ChatNormalizer, NormalizerConfig};
pub use reply::parse_reply;

use thiserror::Error;

use crate::model::AbbreviationMap;

/// Plumbing/mechanical codes the normalizer is asked to cover.
pub const CANONICAL_CODES: &[&str] = &[
    "CFS", "CHWP", "CHWR", "CHWS", "CWP", "CWR", "CWS", "DN", "ET", "FCU", "HUH", "HHWR", "HHWS",
    "HX", "MAU", "VAV",
];

/// Why a normalization attempt produced no usable dictionary.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The normalizer is missing required settings.
    #[error("normalizer not configured: {0}")]
    NotConfigured(String),

    /// The service could not be reached or timed out.
    #[error("normalizer unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("normalizer returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered without any content.
    #[error("normalizer returned an empty response")]
    EmptyResponse,

    /// The content was not valid JSON.
    #[error("normalizer output is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        content: String,
    },

    /// The content was JSON but not an object.
    #[error("normalizer output is a JSON {0}, expected an object")]
    NotAnObject(&'static str),

    /// An entry of the returned object was not a string.
    #[error("normalizer output has a non-text value for {0}")]
    InvalidEntry(String),
}

/// Cleans an abbreviation dictionary.
pub trait Normalizer: Send + Sync {
    /// Return a replacement for `map`, keyed the same way.
    fn normalize(
        &self,
        map: &AbbreviationMap,
        canonical: &[&str],
    ) -> Result<AbbreviationMap, NormalizeError>;
}

impl<F> Normalizer for F
where
    F: Fn(&AbbreviationMap, &[&str]) -> Result<AbbreviationMap, NormalizeError> + Send + Sync,
{
    fn normalize(
        &self,
        map: &AbbreviationMap,
        canonical: &[&str],
    ) -> Result<AbbreviationMap, NormalizeError> {
        self(map, canonical)
    }
}
