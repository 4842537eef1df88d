//! Domain types for the product catalogue.

pub mod product;

pub use product::{toggle_availability, NewProduct, Product, ProductChanges};
