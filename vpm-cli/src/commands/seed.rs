//! Seed command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;
use vpm_core::load_catalog;
use vpm_server::PostgresProductStore;

/// Connections used while seeding.
const SEED_MAX_CONNECTIONS: u32 = 2;

/// Execute the seed command.
pub async fn execute(catalog: PathBuf, database_url: String, dry_run: bool) -> Result<()> {
    let products = load_catalog(&catalog)
        .with_context(|| format!("Invalid catalog {}", catalog.display()))?;

    if dry_run {
        println!(
            "{} Would replace the products table with {} products from {}",
            "[DRY RUN]".yellow().bold(),
            products.len(),
            catalog.display()
        );
        return Ok(());
    }

    let store = PostgresProductStore::connect(&database_url, SEED_MAX_CONNECTIONS)
        .await
        .context("Failed to connect to product database")?;

    let written = store
        .replace_all(products)
        .await
        .context("Failed to seed products")?;

    info!(products = written, "Products table replaced");

    println!(
        "{} Seeded {} products from {}",
        "✓".green().bold(),
        written,
        catalog.display()
    );

    Ok(())
}
