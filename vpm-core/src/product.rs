//! Catalog records and search queries.

use serde::{Deserialize, Serialize};

/// Seed score assumed for catalog entries that do not carry one.
pub const DEFAULT_SEED_SCORE: f64 = 0.5;

/// Result cap applied when a query does not specify one.
pub const DEFAULT_TOP_K: usize = 20;

/// Threshold applied when a query does not specify one.
pub const DEFAULT_MIN_SCORE: f64 = 0.0;

fn default_seed_score() -> f64 {
    DEFAULT_SEED_SCORE
}

/// A catalog product.
///
/// Products are created when the catalog is loaded and are never mutated
/// afterwards. `similarity_score` is the static seed score used as the
/// baseline for every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Catalog category (e.g. "Footwear")
    pub category: String,
    /// Product image reference (absolute URL or server-relative path)
    pub image_url: String,
    /// Seed similarity score in [0, 1]
    #[serde(default = "default_seed_score")]
    pub similarity_score: f64,
}

/// A product annotated with a request-scoped similarity score.
///
/// Serializes with exactly the fields of [`Product`]; `similarity_score`
/// holds the computed score for the query instead of the seed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RankedProduct {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub image_url: String,
    pub similarity_score: f64,
}

impl RankedProduct {
    /// Annotate `product` with a computed `score`.
    pub fn scored(product: &Product, score: f64) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            similarity_score: score,
        }
    }
}

/// Anything carrying a similarity score that can be thresholded.
pub trait Scored {
    fn similarity_score(&self) -> f64;
}

impl Scored for Product {
    fn similarity_score(&self) -> f64 {
        self.similarity_score
    }
}

impl Scored for RankedProduct {
    fn similarity_score(&self) -> f64 {
        self.similarity_score
    }
}

impl<T: Scored + ?Sized> Scored for &T {
    fn similarity_score(&self) -> f64 {
        (**self).similarity_score()
    }
}

/// A single similarity search request.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Query image reference, treated as an opaque string
    pub image_url: String,
    /// Maximum number of results
    pub top_k: usize,
    /// Minimum computed score a result must reach
    pub min_score: f64,
}

impl Query {
    /// Query with the default result cap and threshold.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            top_k: DEFAULT_TOP_K,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_uses_camel_case() {
        let product = Product {
            id: 7,
            name: "Canvas Sneaker".into(),
            category: "Footwear".into(),
            image_url: "https://cdn.example.com/7.jpg".into(),
            similarity_score: 0.42,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["imageUrl"], "https://cdn.example.com/7.jpg");
        assert_eq!(json["similarityScore"], 0.42);
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_missing_seed_score_defaults() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"Mug","category":"Kitchen","imageUrl":"/m.jpg"}"#,
        )
        .unwrap();

        assert_eq!(product.similarity_score, DEFAULT_SEED_SCORE);
    }

    #[test]
    fn test_ranked_product_keeps_product_fields() {
        let product = Product {
            id: 3,
            name: "Lamp".into(),
            category: "Home".into(),
            image_url: "/lamp.jpg".into(),
            similarity_score: 0.9,
        };

        let ranked = RankedProduct::scored(&product, 0.25);
        assert_eq!(ranked.id, 3);
        assert_eq!(ranked.name, "Lamp");
        assert_eq!(ranked.similarity_score, 0.25);
        // The seed on the source record is untouched
        assert_eq!(product.similarity_score, 0.9);
    }

    #[test]
    fn test_query_builder_defaults() {
        let query = Query::new("/uploads/a.jpg");
        assert_eq!(query.top_k, DEFAULT_TOP_K);
        assert_eq!(query.min_score, DEFAULT_MIN_SCORE);

        let query = query.with_top_k(3).with_min_score(0.7);
        assert_eq!(query.top_k, 3);
        assert_eq!(query.min_score, 0.7);
    }
}
