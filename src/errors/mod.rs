//! Unified error handling with a consistent JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Underlying error detail carried in the response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub detail: String,
}

/// JSON body for every failed request: `{ "message": ..., "error": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: ErrorDetail,
}

impl ErrorResponse {
    pub fn new(message: &str, code: &str, detail: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
            error: ErrorDetail {
                code: code.to_string(),
                detail: detail.into(),
            },
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Fetch error: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::Fetch(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, code, detail) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", "NOT_FOUND", msg.clone()),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error fetching data",
                    "STORAGE_ERROR",
                    e.to_string(),
                )
            }
            AppError::Import(msg) => {
                tracing::error!(error = %msg, "Import error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error importing data",
                    "IMPORT_ERROR",
                    msg.clone(),
                )
            }
            AppError::Fetch(msg) => {
                tracing::error!(error = %msg, "Upstream fetch error");
                (StatusCode::BAD_GATEWAY, "Error fetching data", "FETCH_ERROR", msg.clone())
            }
        };

        (status, ErrorResponse::new(message, code, detail)).into_response()
    }
}
