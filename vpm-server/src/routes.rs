//! Router configuration module
//!
//! Configures all routes, middleware layers, and creates the application router.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::handlers::{
    health, list_products, not_found, ready, similarity_handler, upload_handler, UPLOADS_PREFIX,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Prefix under which the browser UI calls the API
pub const API_PREFIX: &str = "/api";

/// Create the application router with default config (for testing)
pub fn create_router(state: AppState) -> Router {
    create_router_with_config(&Config::default(), state)
}

/// Create the application router with custom configuration
pub fn create_router_with_config(config: &Config, state: AppState) -> Router {
    // Configure CORS based on allowed_origins
    let cors = match &config.allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            tracing::info!("CORS: Restricting to {} origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        }
        _ => {
            tracing::warn!("CORS: Allowing all origins (dev mode)");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    // Request body limit (replaces axum's default 2 MB multipart cap)
    let body_limit = RequestBodyLimitLayer::new(config.body_limit_mb * 1024 * 1024);

    // Request timeout
    let timeout = TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.timeout_secs),
    );

    let uploads = ServeDir::new(state.upload_dir.as_ref());

    // API routes, served both at the root and under /api for the browser UI
    let api = Router::new()
        .route("/similarity", post(similarity_handler))
        .route("/products", get(list_products))
        .route("/upload", post(upload_handler))
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Base router with common layers
    let router = Router::new()
        .merge(api.clone())
        .nest(API_PREFIX, api)
        .with_state(state)
        .nest_service(UPLOADS_PREFIX, uploads)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(body_limit)
        .layer(timeout);

    // Conditionally apply rate limiting (disabled in tests, enabled in production)
    if config.rate_limit_enabled {
        match GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_sec)
            .burst_size(config.rate_limit_burst)
            .finish()
        {
            Some(governor_conf) => {
                tracing::info!(
                    "Rate limiting: {} req/s (burst: {})",
                    config.rate_limit_per_sec,
                    config.rate_limit_burst
                );

                return router
                    .layer(GovernorLayer::new(Arc::new(governor_conf)))
                    .layer(TraceLayer::new_for_http());
            }
            None => {
                tracing::error!(
                    per_second = config.rate_limit_per_sec,
                    burst = config.rate_limit_burst,
                    "Invalid rate limit settings, rate limiting DISABLED"
                );
            }
        }
    } else {
        tracing::warn!("Rate limiting: DISABLED");
    }

    router.layer(TraceLayer::new_for_http())
}
