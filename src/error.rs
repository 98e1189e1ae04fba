//! Error taxonomy for the request handlers
//!
//! Validation and lookup failures are part of the public API and are answered
//! with `200 OK` and a `{ "error": ... }` body. Storage failures become `500`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid url")]
    InvalidUrl,

    #[error("No short URL provided")]
    MissingShortUrl,

    #[error("No short URL found for the given input")]
    ShortUrlNotFound,

    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl | AppError::MissingShortUrl | AppError::ShortUrlNotFound => {
                StatusCode::OK
            }
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Storage(err) => {
                tracing::error!(error = %err, "storage failure while handling request");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
