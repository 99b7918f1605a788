//! Product catalog loading.
//!
//! A catalog is a JSON array of [`Product`] documents. Loading validates the
//! catalog invariants (unique ids, seed scores in [0, 1], non-empty names)
//! and returns the products ordered by id.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;
use crate::product::Product;

/// Parse and validate a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    validate_catalog(products)
}

/// Read, parse and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let products = parse_catalog(&json)?;
    tracing::debug!(path = %path.display(), products = products.len(), "Loaded catalog");
    Ok(products)
}

/// Check catalog invariants and sort by id ascending.
pub fn validate_catalog(mut products: Vec<Product>) -> Result<Vec<Product>, CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in &products {
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }
        let seed = product.similarity_score;
        if !seed.is_finite() || !(0.0..=1.0).contains(&seed) {
            return Err(CatalogError::InvalidSeedScore {
                id: product.id,
                score: seed,
            });
        }
        if product.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(product.id));
        }
    }

    products.sort_by_key(|p| p.id);
    Ok(products)
}
