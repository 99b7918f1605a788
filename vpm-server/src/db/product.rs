//! PostgreSQL implementation of the product store.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use vpm_core::{validate_catalog, Product, ProductStore, StoreError};

/// PostgreSQL-backed product store.
///
/// Reads are plain `SELECT`s; the only write path is [`replace_all`],
/// used by the seeding command.
///
/// [`replace_all`]: PostgresProductStore::replace_all
#[derive(Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

/// Row type for database queries.
#[derive(FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category: String,
    image_url: String,
    similarity_score: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            image_url: row.image_url,
            similarity_score: row.similarity_score,
        }
    }
}

impl PostgresProductStore {
    /// Connect to the database and apply pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        tracing::info!(max_connections, "Product store connected and migrations applied");

        Ok(Self { pool })
    }

    /// Replace the whole catalog in a single transaction.
    ///
    /// The catalog is validated before anything is written; on any failure
    /// the previous catalog is left untouched.
    pub async fn replace_all(&self, products: Vec<Product>) -> Result<usize, StoreError> {
        let products = validate_catalog(products)?;

        let mut tx = self.pool.begin().await.map_err(query_error)?;

        sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        for product in &products {
            sqlx::query(
                r#"
                INSERT INTO products (id, name, category, image_url, similarity_score)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.category)
            .bind(&product.image_url)
            .bind(product.similarity_score)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;
        }

        tx.commit().await.map_err(query_error)?;

        tracing::info!(products = products.len(), "Replaced product catalog");

        Ok(products.len())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, image_url, similarity_score
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn check_health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

fn query_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}
