//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No entry matched the key or token
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Create on a key that already exists
    #[error("Key already exists: {0}")]
    Conflict(String),

    /// Request body could not be decoded or does not match the path
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    /// Snapshot encode/decode or storage failure
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Conflict(_) => StatusCode::CONFLICT,
            CacheError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            CacheError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
