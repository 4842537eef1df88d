//! Product store implementation using PostgreSQL.

use crate::domain::{NewProduct, Product};
use crate::storage::store::ProductStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS products (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    price DOUBLE PRECISION NOT NULL CHECK (price > 0),
    availability BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

/// A product store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the pool without opening a connection, so a server can start while
    /// Postgres is still unreachable. `authenticate` reports the real state.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn row_to_product(row: &PgRow) -> Result<Product> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        availability: row.try_get("availability")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn authenticate(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn sync(&self, force: bool) -> Result<()> {
        if force {
            sqlx::query("DROP TABLE IF EXISTS products")
                .execute(&self.pool)
                .await?;
        }
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY id DESC", COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_product).collect()
    }

    async fn find_by_pk(&self, id: i32) -> Result<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn create(&self, product: NewProduct) -> Result<Product> {
        let sql = format!(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&product.name)
            .bind(product.price)
            .fetch_one(&self.pool)
            .await?;
        row_to_product(&row)
    }

    async fn save(&self, product: &Product) -> Result<Option<Product>> {
        let sql = format!(
            "UPDATE products
             SET name = $2, price = $3, availability = $4, updated_at = now()
             WHERE id = $1
             RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.availability)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn destroy(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
