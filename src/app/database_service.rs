//! Store lifecycle operations used by the binaries.
//!
//! - `connect_db`: checks connectivity and creates the schema at server start.
//! - `clear_db`: drops and recreates the schema (one-shot CLI).
//! - `seed_db`: inserts a fixed sample catalogue (one-shot CLI).

use crate::domain::{NewProduct, Product};
use crate::storage::ProductStore;
use tracing::{error, info};

pub const MSG_CONNECT_FAILED: &str = "hubo un error al conectar a la base de datos";
pub const MSG_CLEARED: &str = "Datos Eliminados Correctamente";

pub const SAMPLE_PRODUCTS: &[(&str, f64)] = &[
    ("Monitor Curvo de 49 Pulgadas", 300.0),
    ("Audifonos Inalambricos", 85.5),
    ("Teclado Mecanico RGB", 120.0),
    ("Mouse Gamer", 45.0),
];

/// Authenticates against the store and syncs the schema.
///
/// Failures are logged and reported as `false`; the caller keeps running without
/// a usable store rather than aborting the process.
pub async fn connect_db(store: &dyn ProductStore) -> bool {
    let result = async {
        store.authenticate().await?;
        store.sync(false).await
    }
    .await;

    match result {
        Ok(()) => {
            info!("Database connection established");
            true
        }
        Err(e) => {
            error!(error = %e, "{}", MSG_CONNECT_FAILED);
            false
        }
    }
}

/// Drops and recreates the products table.
pub async fn clear_db(store: &dyn ProductStore) -> anyhow::Result<()> {
    store.sync(true).await?;
    info!("{}", MSG_CLEARED);
    Ok(())
}

/// Inserts `SAMPLE_PRODUCTS`, creating the schema first if needed.
pub async fn seed_db(store: &dyn ProductStore) -> anyhow::Result<Vec<Product>> {
    store.sync(false).await?;
    let mut created = Vec::with_capacity(SAMPLE_PRODUCTS.len());
    for (name, price) in SAMPLE_PRODUCTS {
        let product = store
            .create(NewProduct {
                name: name.to_string(),
                price: *price,
            })
            .await?;
        created.push(product);
    }
    info!(count = created.len(), "Sample products inserted");
    Ok(created)
}
