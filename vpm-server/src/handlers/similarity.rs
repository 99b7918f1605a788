//! Similarity search handler
//!
//! Handles POST /similarity requests: scores the whole catalog against a
//! query image reference and returns the ranked, truncated result list.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use utoipa::ToSchema;
use vpm_core::{Query, RankedProduct, DEFAULT_MIN_SCORE, DEFAULT_TOP_K};

use crate::error::ApiError;
use crate::state::AppState;

/// Request for a similarity search.
///
/// `topK` and `minScore` are lenient: values that are not JSON numbers fall
/// back to their defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityRequest {
    /// Query image reference: an uploaded-file path or an absolute URL
    #[serde(default, deserialize_with = "non_empty_string")]
    #[schema(example = "/uploads/image-1700000000000-0f8e.jpg")]
    pub image_url: Option<String>,

    /// Maximum number of results (default: 20)
    #[serde(default, deserialize_with = "lenient_top_k")]
    #[schema(example = 20)]
    pub top_k: Option<usize>,

    /// Minimum computed score, in [0, 1] (default: 0)
    #[serde(default, deserialize_with = "lenient_number")]
    #[schema(example = 0.5)]
    pub min_score: Option<f64>,
}

impl SimilarityRequest {
    /// Convert into a ranking query, rejecting requests without an image reference.
    pub fn into_query(self) -> Result<Query, ApiError> {
        let image_url = self
            .image_url
            .ok_or_else(|| ApiError::bad_request("imageUrl is required"))?;

        Ok(Query::new(image_url)
            .with_top_k(self.top_k.unwrap_or(DEFAULT_TOP_K))
            .with_min_score(self.min_score.unwrap_or(DEFAULT_MIN_SCORE)))
    }
}

/// Response for a similarity search.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResponse {
    /// The image reference the catalog was ranked against
    #[schema(example = "/uploads/image-1700000000000-0f8e.jpg")]
    pub query_image_url: String,
    /// Ranked products, best match first; `similarityScore` holds the computed score
    pub products: Vec<RankedProduct>,
}

/// Rank the catalog against a query image
///
/// Accepts a JSON body with:
/// - **imageUrl** (required): uploaded-file path (from `/upload`) or absolute image URL
/// - **topK** (optional): result cap, default 20; zero or negative returns no results
/// - **minScore** (optional): minimum computed score, default 0
///
/// Scores are deterministic: the same image reference always yields the
/// same ranking for an unchanged catalog. Ties are ordered by product id.
#[utoipa::path(
    post,
    path = "/similarity",
    tag = "Search",
    request_body = SimilarityRequest,
    responses(
        (status = 200, description = "Ranked products", body = SimilarityResponse),
        (status = 400, description = "Missing imageUrl or malformed JSON body"),
        (status = 500, description = "Product store unavailable")
    )
)]
pub async fn similarity_handler(
    State(state): State<AppState>,
    payload: Result<Json<SimilarityRequest>, JsonRejection>,
) -> Result<Json<SimilarityResponse>, ApiError> {
    let Json(request) = payload?;
    let query = request.into_query()?;

    let products = state.engine.search(&query).await?;

    tracing::info!(
        image_url = %query.image_url,
        top_k = query.top_k,
        min_score = query.min_score,
        results = products.len(),
        "Similarity search"
    );

    Ok(Json(SimilarityResponse {
        query_image_url: query.image_url,
        products,
    }))
}

/// Raw JSON text of a field. Capturing the token unparsed keeps numbers
/// outside the f64 range (e.g. `1e400`) from failing the whole body.
fn raw_field<'de, D>(deserializer: D) -> Result<Box<RawValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer)
}

/// Accept only non-empty strings; anything else counts as missing.
fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = raw_field(deserializer)?;
    Ok(serde_json::from_str::<String>(raw.get())
        .ok()
        .filter(|s| !s.is_empty()))
}

/// Any JSON number, saturating to ±infinity when out of range; other
/// values count as missing.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = raw_field(deserializer)?;
    // A bare JSON token only parses as f64 when it is a number literal
    Ok(raw.get().parse::<f64>().ok())
}

/// A JSON number used as a result cap: fractions are floored and
/// zero or negative caps become 0 (no results).
fn lenient_top_k<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(|k| if k > 0.0 { k.floor() as usize } else { 0 }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SimilarityRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let query = parse(r#"{"imageUrl": "/uploads/a.jpg"}"#).into_query().unwrap();
        assert_eq!(query.image_url, "/uploads/a.jpg");
        assert_eq!(query.top_k, DEFAULT_TOP_K);
        assert_eq!(query.min_score, DEFAULT_MIN_SCORE);
    }

    #[test]
    fn test_explicit_values() {
        let query = parse(r#"{"imageUrl": "https://x.test/a.png", "topK": 5, "minScore": 0.75}"#)
            .into_query()
            .unwrap();
        assert_eq!(query.top_k, 5);
        assert_eq!(query.min_score, 0.75);
    }

    #[test]
    fn test_malformed_numbers_coerced_to_defaults() {
        let query = parse(r#"{"imageUrl": "x", "topK": "ten", "minScore": [0.5]}"#)
            .into_query()
            .unwrap();
        assert_eq!(query.top_k, DEFAULT_TOP_K);
        assert_eq!(query.min_score, DEFAULT_MIN_SCORE);

        let query = parse(r#"{"imageUrl": "x", "topK": null, "minScore": "0.9"}"#)
            .into_query()
            .unwrap();
        assert_eq!(query.top_k, DEFAULT_TOP_K);
        assert_eq!(query.min_score, DEFAULT_MIN_SCORE);
    }

    #[test]
    fn test_out_of_range_numbers_saturate() {
        let request = parse(r#"{"imageUrl": "x", "topK": 1e400, "minScore": 1e400}"#);
        assert_eq!(request.top_k, Some(usize::MAX));
        assert_eq!(request.min_score, Some(f64::INFINITY));

        let request = parse(r#"{"imageUrl": "x", "topK": -1e400, "minScore": -1e400}"#);
        assert_eq!(request.top_k, Some(0));
        assert_eq!(request.min_score, Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_top_k_coercion() {
        let top_k = |json: &str| parse(json).top_k;
        assert_eq!(top_k(r#"{"topK": 0}"#), Some(0));
        assert_eq!(top_k(r#"{"topK": -4}"#), Some(0));
        assert_eq!(top_k(r#"{"topK": 2.9}"#), Some(2));
        assert_eq!(top_k(r#"{"topK": 0.5}"#), Some(0));
        assert_eq!(top_k(r#"{}"#), None);
    }

    #[test]
    fn test_missing_image_url_rejected() {
        for body in [
            r#"{}"#,
            r#"{"imageUrl": ""}"#,
            r#"{"imageUrl": null}"#,
            r#"{"imageUrl": 42}"#,
            r#"{"topK": 3}"#,
        ] {
            let err = parse(body).into_query().unwrap_err();
            assert_eq!(err.to_string(), "imageUrl is required", "body: {body}");
        }
    }
}
