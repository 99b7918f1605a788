//! Search command implementation.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;
use vpm_core::Query;
use vpm_server::handlers::SimilarityResponse;

use crate::utils::{format_score, ProductSource};

/// Execute the search command.
pub async fn execute(
    image_ref: String,
    source: ProductSource,
    top_k: usize,
    min_score: f64,
    json: bool,
) -> Result<()> {
    let engine = source.open().await?;

    let query = Query::new(image_ref)
        .with_top_k(top_k)
        .with_min_score(min_score);
    let products = engine.search(&query).await.context("Search failed")?;

    info!(
        image_ref = %query.image_url,
        results = products.len(),
        "Search complete"
    );

    if json {
        let response = SimilarityResponse {
            query_image_url: query.image_url,
            products,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!();
    println!(
        "{} {}",
        "Results for".bold(),
        query.image_url.cyan()
    );
    println!(
        "   {} top {} with score >= {}",
        "Filter:".dimmed(),
        top_k,
        min_score
    );
    println!();

    if products.is_empty() {
        println!("   {}", "No products matched.".yellow());
        return Ok(());
    }

    for (rank, product) in products.iter().enumerate() {
        println!(
            "   {:>3}. {}  {:<32} {} {}",
            rank + 1,
            format_score(product.similarity_score),
            product.name,
            format!("#{}", product.id).dimmed(),
            format!("[{}]", product.category).dimmed()
        );
    }
    println!();

    Ok(())
}
