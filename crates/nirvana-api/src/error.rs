use std::time::Duration;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use nirvana_classifier::ClassifierError;
use nirvana_db::StorageError;
use nirvana_types::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    Decode(#[from] JsonRejection),

    #[error("invalid path parameter: {0}")]
    BadRequest(#[from] PathRejection),

    #[error("no such route")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("storage call exceeded {0:?}")]
    StorageTimeout(Duration),

    #[error("blocking task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(rejection) => rejection.status(),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage(_) | ApiError::StorageTimeout(_) | ApiError::TaskFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Classifier(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side details stay in the log.
        let message = match &self {
            ApiError::Decode(_) | ApiError::BadRequest(_) => {
                warn!("Rejected request: {}", self);
                self.to_string()
            }
            ApiError::NotFound | ApiError::MethodNotAllowed => self.to_string(),
            ApiError::Storage(_) => {
                error!("Storage failure: {}", self);
                "storage unavailable".to_string()
            }
            ApiError::StorageTimeout(_) => {
                error!("Storage timeout: {}", self);
                "storage unavailable".to_string()
            }
            ApiError::TaskFailed(_) => {
                error!("Request task panicked or was cancelled: {}", self);
                "storage unavailable".to_string()
            }
            ApiError::Classifier(_) => {
                error!("Classifier failure: {}", self);
                "emotion classifier unavailable".to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
