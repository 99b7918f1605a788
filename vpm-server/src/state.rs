//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use vpm_core::{MemoryProductStore, ProductStore, RankingEngine, StoreError};

use crate::config::Config;
use crate::db::PostgresProductStore;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Ranking engine over the configured product store
    pub engine: Arc<RankingEngine>,
    /// Directory where uploaded query images are written
    pub upload_dir: Arc<PathBuf>,
    /// Maximum accepted upload size in bytes
    pub max_file_size: usize,
}

impl AppState {
    /// Create state around an already constructed store.
    pub fn new(store: Arc<dyn ProductStore>, config: &Config) -> Self {
        Self {
            engine: Arc::new(RankingEngine::new(store)),
            upload_dir: Arc::new(config.upload_dir.clone()),
            max_file_size: config.max_file_size(),
        }
    }

    /// Create state from configuration
    ///
    /// Uses PostgreSQL if `database_url` is set, otherwise loads the JSON
    /// catalog at `catalog_path` into memory.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store: Arc<dyn ProductStore> = match &config.database_url {
            Some(url) => {
                tracing::info!("Using PostgreSQL product store");
                Arc::new(PostgresProductStore::connect(url, config.database_max_connections).await?)
            }
            None => {
                tracing::warn!(
                    catalog = %config.catalog_path.display(),
                    "DATABASE_URL not set, using in-memory product store"
                );
                Arc::new(MemoryProductStore::from_file(&config.catalog_path)?)
            }
        };

        Ok(Self::new(store, config))
    }
}
