//! API error handling module
//!
//! Provides a unified error type for all API endpoints with structured error variants.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use vpm_core::StoreError;

/// Message returned to clients for every server-side failure
const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// API error type with structured variants for different error categories
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request - client provided invalid input
    #[error("{0}")]
    BadRequest(String),

    /// Not found - requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error - unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Product store failure - the request is aborted before any ranking
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) | Self::Store(_) => "INTERNAL_ERROR",
        }
    }

    /// Get sanitized error message for client response
    pub fn client_message(&self) -> String {
        match self {
            // Server-side details stay in the logs
            Self::Internal(_) | Self::Store(_) => GENERIC_SERVER_ERROR.to_string(),
            _ => self.to_string(),
        }
    }

    /// Get the error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
            Self::Store(_) => "store",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let code = self.error_code();
        let internal_message = self.to_string();
        let client_message = self.client_message();

        // Log based on severity, always including internal details
        match &self {
            Self::BadRequest(_) | Self::NotFound(_) => {
                tracing::warn!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Client error"
                );
            }
            Self::Internal(_) | Self::Store(_) => {
                tracing::error!(
                    status = %status,
                    category = category,
                    code = code,
                    error = %internal_message,
                    "Server error"
                );
            }
        }

        // All error responses include a `code` field for programmatic error handling
        let body = serde_json::json!({
            "error": client_message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}
