use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a product catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not a valid product list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate product id {0}")]
    DuplicateId(i64),

    #[error("Product {id} has seed score {score}, expected a value in [0, 1]")]
    InvalidSeedScore { id: i64, score: f64 },

    #[error("Product {0} has an empty name")]
    EmptyName(i64),
}

/// Errors surfaced by a product store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Migration execution failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Query execution failed
    #[error("Query error: {0}")]
    Query(String),

    /// Stored rows violate the catalog invariants
    #[error("Invalid catalog data: {0}")]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
