//! In-process product store.
//!
//! Mirrors the Postgres semantics (serial ids starting at 1, default availability,
//! `updated_at` refreshed on save) so the HTTP layer behaves the same on both.

use crate::domain::{NewProduct, Product};
use crate::storage::store::ProductStore;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Product>,
}

#[derive(Default)]
pub struct InMemoryProductStore {
    table: RwLock<Table>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn authenticate(&self) -> Result<()> {
        Ok(())
    }

    async fn sync(&self, force: bool) -> Result<()> {
        if force {
            let mut table = self.table.write().await;
            *table = Table::default();
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.values().rev().cloned().collect())
    }

    async fn find_by_pk(&self, id: i32) -> Result<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product> {
        let mut table = self.table.write().await;
        let id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| anyhow!("products id sequence exhausted"))?;
        table.next_id = id;
        let now = Utc::now();
        let row = Product {
            id,
            name: product.name,
            price: product.price,
            availability: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn save(&self, product: &Product) -> Result<Option<Product>> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&product.id) else {
            return Ok(None);
        };
        row.name = product.name.clone();
        row.price = product.price;
        row.availability = product.availability;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn destroy(&self, id: i32) -> Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
