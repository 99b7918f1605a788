//! VPM Core - scoring and ranking for the visual product matcher
//!
//! This crate holds the product data model and the one piece of real logic in
//! the system: scoring every catalog product against a query image reference,
//! filtering by a minimum score, and ranking the survivors.
//!
//! # Features
//!
//! - Deterministic placeholder similarity (SHA-256 of the query blended with a
//!   per-product seed score)
//! - A single threshold filter shared by server and browser
//! - Catalog loading with invariant checks
//! - `store` (default): async `ProductStore` trait, in-memory store and the
//!   `RankingEngine` that binds them
//!
//! # Example
//!
//! ```
//! use vpm_core::{rank, Product};
//!
//! let products = vec![Product {
//!     id: 1,
//!     name: "A".into(),
//!     category: "Demo".into(),
//!     image_url: "/images/1.jpg".into(),
//!     similarity_score: 0.9,
//! }];
//!
//! let ranked = rank("x", &products, 10, 0.0);
//! assert_eq!(ranked.len(), 1);
//! assert!(ranked[0].similarity_score <= 1.0);
//! ```

pub mod catalog;
pub mod error;
pub mod product;
pub mod rank;
pub mod score;

#[cfg(feature = "store")]
pub mod engine;
#[cfg(feature = "store")]
pub mod store;

// Re-export main types for convenience
pub use catalog::{load_catalog, parse_catalog, validate_catalog};
pub use error::{CatalogError, Result, StoreError};
pub use product::{
    Product, Query, RankedProduct, Scored, DEFAULT_MIN_SCORE, DEFAULT_SEED_SCORE, DEFAULT_TOP_K,
};
pub use rank::{compare_ranked, filter_min_score, meets_min_score, rank, rank_with};
pub use score::{hash_unit, query_digest, score, HashSeedScorer, SimilarityScorer};

#[cfg(feature = "store")]
pub use engine::RankingEngine;
#[cfg(feature = "store")]
pub use store::{MemoryProductStore, ProductStore};
