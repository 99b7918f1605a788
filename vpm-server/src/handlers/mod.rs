//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod health;
pub mod products;
pub mod similarity;
pub mod upload;

use crate::error::ApiError;

pub use crate::state::AppState;
pub use health::{health, ready, HealthResponse, ReadyResponse};
pub use products::list_products;
pub use similarity::{similarity_handler, SimilarityRequest, SimilarityResponse};
pub use upload::{upload_handler, UploadResponse, UPLOADS_PREFIX};

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("No such endpoint")
}
