//! Client for the external emotion classifier.
//!
//! The service takes `{"text": ...}` and answers with labels ranked by
//! descending score. Only the first [`TOP_K`] are kept.

mod error;

pub use error::ClassifierError;

use std::time::Duration;

use nirvana_types::api::EmotionScore;
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::debug;

/// Number of ranked labels handed back to callers.
pub const TOP_K: usize = 5;

/// Largest classifier body accepted. A full go_emotions ranking is a few KB.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/SamLowe/roberta-base-go_emotions";

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

/// The hosted model wraps single-input results in an outer array; plain
/// deployments return the ranked list directly.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Flat(Vec<EmotionScore>),
    Nested(Vec<Vec<EmotionScore>>),
}

impl ClassifyResponse {
    fn into_ranked(self) -> Vec<EmotionScore> {
        match self {
            ClassifyResponse::Flat(scores) => scores,
            ClassifyResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl ClassifierClient {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
            api_token: config.api_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Classify `text`, returning at most [`TOP_K`] labels. A shorter ranking
    /// is returned as is.
    pub async fn classify(&self, text: &str) -> Result<Vec<EmotionScore>, ClassifierError> {
        let body = serde_json::json!({ "text": text }).to_string();

        let mut req = self
            .http
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let mut resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifierError::Status { status, body });
        }

        if resp
            .content_length()
            .is_some_and(|len| len > MAX_RESPONSE_BYTES as u64)
        {
            return Err(ClassifierError::ResponseTooLarge { limit: MAX_RESPONSE_BYTES });
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            if bytes.len() + chunk.len() > MAX_RESPONSE_BYTES {
                return Err(ClassifierError::ResponseTooLarge { limit: MAX_RESPONSE_BYTES });
            }
            bytes.extend_from_slice(&chunk);
        }

        let mut ranked = serde_json::from_slice::<ClassifyResponse>(&bytes)
            .map_err(ClassifierError::MalformedResponse)?
            .into_ranked();

        debug!("Classifier returned {} labels", ranked.len());
        ranked.truncate(TOP_K);
        Ok(ranked)
    }
}
