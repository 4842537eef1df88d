pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::{clear_db, connect_db, seed_db};
pub use domain::{NewProduct, Product, ProductChanges};
pub use storage::{InMemoryProductStore, PostgresProductStore, ProductStore, SharedStore};
