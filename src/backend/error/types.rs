/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers.
 *
 * # Error Categories
 *
 * ## Not Found
 *
 * The requested item is absent. Answered with 404 and an empty body.
 *
 * ## Validation Errors
 *
 * Malformed JSON bodies and missing query parameters. Answered with 400;
 * the request never reaches the store.
 *
 * ## Store Errors
 *
 * Failures of the persistence collaborator. Answered with 503; the client
 * may retry.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::items::store::ItemStoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// Each variant maps to one HTTP status via [`BackendError::status_code`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// Requested resource does not exist
    #[error("Not found")]
    NotFound,

    /// Bad input (from the shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Item store failure
    #[error(transparent)]
    StoreError(#[from] ItemStoreError),
}

impl BackendError {
    /// Create a validation error for `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::validation(field, message))
    }

    /// Create an error for a request body that could not be decoded
    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::serialization(message))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` / `StoreError::NotFound` - 404 Not Found
    /// - `StoreError::Repository` - 503 Service Unavailable
    /// - `SharedError::ValidationError` - 400 Bad Request
    /// - `SharedError::SerializationError` - 400 Bad Request
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::StoreError(err) => match err {
                ItemStoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                ItemStoreError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the response carries no body (true for every 404)
    pub fn is_empty_response(&self) -> bool {
        self.status_code() == StatusCode::NOT_FOUND
    }
}
