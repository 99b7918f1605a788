//! Product store abstraction.
//!
//! The ranking engine never touches a database directly: it receives an
//! `Arc<dyn ProductStore>` at construction time. The server chooses the
//! backend at startup (PostgreSQL when configured, otherwise the in-memory
//! catalog).

mod memory;

pub use memory::MemoryProductStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::product::Product;

/// Read-only access to the product catalog.
///
/// Implementations must be thread-safe (`Send + Sync`); many searches may
/// read the same store concurrently.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Full catalog snapshot, ordered by id ascending.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Check that the backend is reachable.
    async fn check_health(&self) -> Result<()>;

    /// Short backend identifier for health reporting ("memory", "postgres").
    fn backend_name(&self) -> &'static str;
}
