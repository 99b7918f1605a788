//! WebAssembly bindings for client-side result refinement.
//!
//! The browser refines a result list by minimum score without another
//! request to the server. These bindings run the same threshold function the
//! server applies, so a local refinement always equals what the server would
//! have returned for that threshold.

use serde::Serialize;
use vpm_core::{filter_min_score, rank, score, validate_catalog, Product, RankedProduct};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result list returned to JavaScript.
#[derive(Serialize)]
pub struct ProductsResult {
    /// Products in display order
    pub products: Vec<RankedProduct>,
    /// Error message if the input could not be parsed or validated
    pub error: Option<String>,
}

/// Score returned to JavaScript.
#[derive(Serialize)]
pub struct ScoreResult {
    pub score: Option<f64>,
    pub error: Option<String>,
}

/// Keep results whose score is at least `min_score`, preserving order.
///
/// # Arguments
/// * `results_json` - The `products` array of a similarity response
/// * `min_score` - Inclusive threshold
///
/// # Returns
/// A JSON string `{"products": [...], "error": null}`
#[wasm_bindgen]
pub fn filter_results(results_json: &str, min_score: f64) -> String {
    products_json(filter_internal(results_json, min_score))
}

/// Rank `products_json` (a catalog array) against `image_ref`.
#[wasm_bindgen]
pub fn rank_products(image_ref: &str, products_json: &str, top_k: u32, min_score: f64) -> String {
    self::products_json(rank_internal(image_ref, products_json, top_k, min_score))
}

/// Score a single catalog product against `image_ref`.
#[wasm_bindgen]
pub fn score_product(image_ref: &str, product_json: &str) -> String {
    let result = match score_internal(image_ref, product_json) {
        Ok(score) => ScoreResult {
            score: Some(score),
            error: None,
        },
        Err(e) => ScoreResult {
            score: None,
            error: Some(e),
        },
    };
    serde_json::to_string(&result)
        .unwrap_or_else(|_| r#"{"score":null,"error":"Unknown error"}"#.to_string())
}

fn score_internal(image_ref: &str, product_json: &str) -> Result<f64, String> {
    let product: Product = serde_json::from_str(product_json)
        .map_err(|e| format!("Failed to parse product: {}", e))?;
    let products =
        validate_catalog(vec![product]).map_err(|e| format!("Invalid product: {}", e))?;
    products
        .first()
        .map(|product| score(image_ref, product))
        .ok_or_else(|| "Missing product".to_string())
}

fn filter_internal(results_json: &str, min_score: f64) -> Result<Vec<RankedProduct>, String> {
    let results: Vec<RankedProduct> = serde_json::from_str(results_json)
        .map_err(|e| format!("Failed to parse results: {}", e))?;
    Ok(filter_min_score(results, min_score))
}

fn rank_internal(
    image_ref: &str,
    products_json: &str,
    top_k: u32,
    min_score: f64,
) -> Result<Vec<RankedProduct>, String> {
    let products: Vec<Product> = serde_json::from_str(products_json)
        .map_err(|e| format!("Failed to parse products: {}", e))?;
    let products = validate_catalog(products).map_err(|e| format!("Invalid catalog: {}", e))?;
    Ok(rank(image_ref, &products, top_k as usize, min_score))
}

fn products_json(result: Result<Vec<RankedProduct>, String>) -> String {
    let result = match result {
        Ok(products) => ProductsResult {
            products,
            error: None,
        },
        Err(e) => ProductsResult {
            products: Vec::new(),
            error: Some(e),
        },
    };
    serde_json::to_string(&result)
        .unwrap_or_else(|_| r#"{"products":[],"error":"Unknown error"}"#.to_string())
}

/// Get the library version.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn results() -> String {
        json!([
            {"id": 4, "name": "D", "category": "Demo", "imageUrl": "/d.jpg", "similarityScore": 0.9},
            {"id": 2, "name": "B", "category": "Demo", "imageUrl": "/b.jpg", "similarityScore": 0.7},
            {"id": 9, "name": "I", "category": "Demo", "imageUrl": "/i.jpg", "similarityScore": 0.7},
            {"id": 1, "name": "A", "category": "Demo", "imageUrl": "/a.jpg", "similarityScore": 0.2}
        ])
        .to_string()
    }

    fn ids(output: &str) -> Vec<i64> {
        let value: Value = serde_json::from_str(output).unwrap();
        value["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_filter_keeps_order_and_is_inclusive() {
        assert_eq!(ids(&filter_results(&results(), 0.7)), vec![4, 2, 9]);
        assert_eq!(ids(&filter_results(&results(), 0.0)), vec![4, 2, 9, 1]);
        assert!(ids(&filter_results(&results(), 1.1)).is_empty());
    }

    #[test]
    fn test_filter_reports_parse_errors() {
        let value: Value = serde_json::from_str(&filter_results("not json", 0.5)).unwrap();
        assert!(value["products"].as_array().unwrap().is_empty());
        assert!(value["error"]
            .as_str()
            .unwrap()
            .contains("Failed to parse results"));
    }

    #[test]
    fn test_local_refinement_matches_server_threshold() {
        let catalog = json!([
            {"id": 1, "name": "A", "category": "Demo", "imageUrl": "/a.jpg", "similarityScore": 0.9},
            {"id": 2, "name": "B", "category": "Demo", "imageUrl": "/b.jpg", "similarityScore": 0.4},
            {"id": 3, "name": "C", "category": "Demo", "imageUrl": "/c.jpg", "similarityScore": 0.1},
            {"id": 4, "name": "D", "category": "Demo", "imageUrl": "/d.jpg"}
        ])
        .to_string();

        let unfiltered = rank_products("query.jpg", &catalog, 20, 0.0);
        let unfiltered: Value = serde_json::from_str(&unfiltered).unwrap();
        let results = unfiltered["products"].to_string();

        for threshold in [0.0, 0.3, 0.5, 0.65, 0.8, 1.0] {
            assert_eq!(
                ids(&filter_results(&results, threshold)),
                ids(&rank_products("query.jpg", &catalog, 20, threshold)),
                "threshold {threshold}"
            );
        }
    }

    #[test]
    fn test_score_product_known_value() {
        let product = json!({"id": 1, "name": "A", "category": "Demo", "imageUrl": "/a.jpg", "similarityScore": 0.9});
        let value: Value =
            serde_json::from_str(&score_product("x", &product.to_string())).unwrap();
        let score = value["score"].as_f64().unwrap();
        assert!((score - 0.812_302_682_109_247_6).abs() < 1e-9);
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_score_product_parse_error() {
        let value: Value = serde_json::from_str(&score_product("x", "{}")).unwrap();
        assert!(value["score"].is_null());
        assert!(value["error"].is_string());
    }

    #[test]
    fn test_score_product_rejects_out_of_range_seed() {
        let product = json!({"id": 1, "name": "A", "category": "Demo", "imageUrl": "/a.jpg", "similarityScore": 2.0});
        let value: Value =
            serde_json::from_str(&score_product("x", &product.to_string())).unwrap();
        assert!(value["score"].is_null());
        assert!(value["error"].as_str().unwrap().contains("Invalid product"));
    }

    #[test]
    fn test_rank_products_zero_top_k() {
        let catalog = json!([
            {"id": 1, "name": "A", "category": "Demo", "imageUrl": "/a.jpg", "similarityScore": 0.9}
        ])
        .to_string();
        assert!(ids(&rank_products("x", &catalog, 0, 0.0)).is_empty());
    }

    #[test]
    fn test_rank_products_rejects_invalid_catalog() {
        let out_of_range = json!([
            {"id": 1, "name": "A", "category": "Demo", "imageUrl": "/a.jpg", "similarityScore": 2.0}
        ])
        .to_string();
        let value: Value = serde_json::from_str(&rank_products("x", &out_of_range, 20, 0.0)).unwrap();
        assert!(value["products"].as_array().unwrap().is_empty());
        assert!(value["error"].as_str().unwrap().contains("Invalid catalog"));

        let duplicate = json!([
            {"id": 1, "name": "A", "category": "Demo", "imageUrl": "/a.jpg", "similarityScore": 0.2},
            {"id": 1, "name": "B", "category": "Demo", "imageUrl": "/b.jpg", "similarityScore": 0.3}
        ])
        .to_string();
        let value: Value = serde_json::from_str(&rank_products("x", &duplicate, 20, 0.0)).unwrap();
        assert!(value["error"].as_str().unwrap().contains("Duplicate product id 1"));
    }

    #[test]
    fn test_get_version() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }
}
