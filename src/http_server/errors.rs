//! # API Errors
//!
//! Error envelope for the HTTP surface. Unknown names are client-input
//! errors (400); everything else surfaces as a 500 carrying the
//! underlying message, matching the original service's contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::procedures::ProcedureError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API-level errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Required query parameter absent
    #[error("Missing query parameter: {0}")]
    MissingParam(&'static str),

    /// Query name not in the statement catalog
    #[error("Unknown query: {0}")]
    UnknownQuery(String),

    /// Resource name not in the schema/primary-key registry
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store-level failure, message passed through for diagnostics
    #[error("{0}")]
    Operation(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_)
            | ApiError::UnknownQuery(_)
            | ApiError::UnknownResource(_) => StatusCode::BAD_REQUEST,
            ApiError::Operation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::UnknownResource(name) => ApiError::UnknownResource(name),
            DispatchError::UnknownQuery(name) => ApiError::UnknownQuery(name),
            DispatchError::Store(store) => ApiError::Operation(store.to_string()),
        }
    }
}

impl From<ProcedureError> for ApiError {
    fn from(err: ProcedureError) -> Self {
        ApiError::Operation(err.to_string())
    }
}

/// JSON error body: `{ "error": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
