//! The contract every product store implements.
//!
//! Handlers only ever see a `SharedStore`, so the HTTP layer can be driven by
//! Postgres in production and by `InMemoryProductStore` in tests.

use crate::domain::{NewProduct, Product};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type SharedStore = Arc<dyn ProductStore>;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Checks that the store is reachable.
    async fn authenticate(&self) -> Result<()>;

    /// Creates the `products` table if missing. With `force` the table is dropped first.
    async fn sync(&self, force: bool) -> Result<()>;

    /// All products, newest id first.
    async fn find_all(&self) -> Result<Vec<Product>>;

    async fn find_by_pk(&self, id: i32) -> Result<Option<Product>>;

    /// Inserts a row; the store assigns `id`, timestamps and the default availability.
    async fn create(&self, product: NewProduct) -> Result<Product>;

    /// Persists the mutable fields of an existing row and returns the stored version.
    ///
    /// Returns `None` when the row vanished between lookup and save.
    async fn save(&self, product: &Product) -> Result<Option<Product>>;

    /// Hard delete. Returns whether a row was removed.
    async fn destroy(&self, id: i32) -> Result<bool>;
}
