//! Catalog listing handler

use axum::{extract::State, Json};
use vpm_core::Product;

use crate::error::ApiError;
use crate::state::AppState;

/// List the full product catalog
///
/// Returns every product, sorted by id ascending, with its seed similarity score.
#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "Full catalog", body = [Product]),
        (status = 500, description = "Product store unavailable")
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.engine.products().await?;
    tracing::debug!(products = products.len(), "Listed catalog");
    Ok(Json(products))
}
