//! In-memory product store.
//!
//! Holds an immutable catalog snapshot loaded once at startup. Reads clone
//! the snapshot, so concurrent searches never contend on a lock.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::ProductStore;
use crate::catalog::{load_catalog, validate_catalog};
use crate::error::{CatalogError, Result};
use crate::product::Product;

/// Catalog kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    products: Arc<[Product]>,
}

impl MemoryProductStore {
    /// Build a store from products, validating catalog invariants.
    pub fn new(products: Vec<Product>) -> std::result::Result<Self, CatalogError> {
        let products = validate_catalog(products)?;
        Ok(Self {
            products: products.into(),
        })
    }

    /// Build a store from a JSON catalog file.
    pub fn from_file(path: &Path) -> std::result::Result<Self, CatalogError> {
        let products = load_catalog(path)?;
        tracing::info!(
            path = %path.display(),
            products = products.len(),
            "In-memory product store loaded"
        );
        Ok(Self {
            products: products.into(),
        })
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.to_vec())
    }

    async fn check_health(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
