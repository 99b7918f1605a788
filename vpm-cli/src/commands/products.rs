//! Products command implementation.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::utils::{format_score, ProductSource};

/// Execute the products command.
pub async fn execute(source: ProductSource, json: bool) -> Result<()> {
    let engine = source.open().await?;
    let products = engine.products().await.context("Failed to list products")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    println!();
    println!(
        "{} {} products ({} store)",
        "Catalog:".bold(),
        products.len(),
        engine.store().backend_name()
    );
    println!();

    for product in &products {
        println!(
            "   {:>4}  {}  {:<32} {}",
            product.id,
            format_score(product.similarity_score),
            product.name,
            format!("[{}]", product.category).dimmed()
        );
    }
    println!();

    Ok(())
}
