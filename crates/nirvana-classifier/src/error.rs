use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Connection failure, timeout, or an interrupted body.
    #[error("classifier request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("classifier answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("classifier response exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },

    #[error("classifier response is not a ranked label list: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}
