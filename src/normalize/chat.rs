//! Normalizer backed by an OpenAI-compatible chat completions endpoint.

use std::env;
use std::time::Duration;

use serde::Deserialize;

use super::{parse_reply, NormalizeError, Normalizer};
use crate::model::AbbreviationMap;

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that cleans plumbing abbreviation dictionaries.";

/// Settings for [`ChatNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Base URL of the API, without the `/chat/completions` suffix
    pub base_url: String,

    /// Model name sent with each request
    pub model: String,

    /// Bearer token
    pub api_key: Option<String>,

    /// Request deadline (none = client default)
    pub timeout: Option<Duration>,
}

impl NormalizerConfig {
    pub const DEFAULT_BASE_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta/openai";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";

    /// Create a config with default endpoint and model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `TAKEOFF_BASE_URL`, `TAKEOFF_MODEL`, `TAKEOFF_API_KEY` and
    /// `TAKEOFF_TIMEOUT_SECS`, keeping defaults for unset variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("TAKEOFF_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(model) = env::var("TAKEOFF_MODEL") {
            config.model = model;
        }
        config.api_key = env::var("TAKEOFF_API_KEY").ok().filter(|k| !k.is_empty());
        config.timeout = env::var("TAKEOFF_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);
        config
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

/// Asks a chat model to clean the dictionary. One blocking request, no retry.
pub struct ChatNormalizer {
    config: NormalizerConfig,
    client: reqwest::blocking::Client,
}

impl ChatNormalizer {
    /// Build a normalizer; fails when no API key is configured.
    pub fn new(config: NormalizerConfig) -> Result<Self, NormalizeError> {
        if config.api_key.is_none() {
            return Err(NormalizeError::NotConfigured("missing API key".to_string()));
        }

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// The configuration in use.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    fn request_body(&self, map: &AbbreviationMap, canonical: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(map, canonical) },
            ],
        })
    }
}

impl Normalizer for ChatNormalizer {
    fn normalize(
        &self,
        map: &AbbreviationMap,
        canonical: &[&str],
    ) -> Result<AbbreviationMap, NormalizeError> {
        let mut request = self
            .client
            .post(self.config.endpoint())
            .json(&self.request_body(map, canonical));
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(NormalizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion =
            serde_json::from_str(&body).map_err(|source| NormalizeError::InvalidJson {
                source,
                content: body.clone(),
            })?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(NormalizeError::EmptyResponse)?;

        log::debug!("Normalizer replied with {} bytes", content.len());
        parse_reply(&content)
    }
}

/// User prompt embedding the raw dictionary and the expected codes.
pub(crate) fn build_prompt(map: &AbbreviationMap, canonical: &[&str]) -> String {
    let raw = serde_json::to_string_pretty(map).unwrap_or_else(|_| "{}".to_string());
    format!(
        "I have the following raw plumbing abbreviations mapping (with some entries\n\
         missing or containing extra bleed-through text). Please correct each code to\n\
         its proper full form. Return ONLY a JSON object mapping each code to its\n\
         clean full phrase, with no extra commentary.\n\n\
         Raw map:\n```json\n{}\n```\n\n\
         The canonical plumbing abbreviations you should include (even if blank above) are: {}.\n",
        raw,
        canonical.join(", ")
    )
}
