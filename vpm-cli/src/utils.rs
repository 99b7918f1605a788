//! Common utility functions shared across CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use vpm_core::{MemoryProductStore, ProductStore, RankingEngine};
use vpm_server::PostgresProductStore;

/// Connections used by one-shot commands.
const CLI_MAX_CONNECTIONS: u32 = 2;

/// Where a command reads its products from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductSource {
    Catalog(PathBuf),
    Database(String),
}

impl ProductSource {
    /// A database URL, when given, takes precedence over the catalog file.
    pub fn new(catalog: PathBuf, database_url: Option<String>) -> Self {
        match database_url {
            Some(url) => Self::Database(url),
            None => Self::Catalog(catalog),
        }
    }

    /// Open the backing store and wrap it in a ranking engine.
    pub async fn open(&self) -> Result<RankingEngine> {
        let store: Arc<dyn ProductStore> = match self {
            Self::Catalog(path) => Arc::new(open_catalog(path)?),
            Self::Database(url) => Arc::new(
                PostgresProductStore::connect(url, CLI_MAX_CONNECTIONS)
                    .await
                    .context("Failed to connect to product database")?,
            ),
        };
        Ok(RankingEngine::new(store))
    }
}

/// Load a catalog file into an in-memory store.
pub fn open_catalog(path: &Path) -> Result<MemoryProductStore> {
    MemoryProductStore::from_file(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))
}

/// Render a score with three decimals, colored by strength.
pub fn format_score(score: f64) -> ColoredString {
    let text = format!("{score:.3}");
    if score >= 0.75 {
        text.green()
    } else if score >= 0.5 {
        text.yellow()
    } else {
        text.dimmed()
    }
}
