//! Validate command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;
use vpm_core::load_catalog;

/// Execute the validate command.
pub fn execute(catalog: PathBuf) -> Result<()> {
    let products = load_catalog(&catalog)
        .with_context(|| format!("Invalid catalog {}", catalog.display()))?;

    info!(path = %catalog.display(), products = products.len(), "Catalog valid");

    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
    for product in &products {
        *categories.entry(product.category.as_str()).or_default() += 1;
    }

    println!();
    println!("{} {}", "✓".green().bold(), "Catalog is valid".green().bold());
    println!();
    println!("   {} {}", "File:".dimmed(), catalog.display());
    println!("   {} {}", "Products:".dimmed(), products.len());
    for (category, count) in &categories {
        println!("   {} {} ({})", "Category:".dimmed(), category, count);
    }
    println!();

    Ok(())
}
