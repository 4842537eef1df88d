pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
pub use store::{ProductStore, SharedStore};
