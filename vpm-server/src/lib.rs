//! VPM Server Library - REST API components for visual product search
//!
//! This library exposes the server components for use in integration tests
//! and by the `vpm` CLI. The main binary uses these same components.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::Config;
pub use db::PostgresProductStore;
pub use error::ApiError;
pub use openapi::ApiDoc;
pub use routes::{create_router, create_router_with_config};
pub use state::AppState;
