//! The `Product` entity and the value types used to create and change it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted product row.
///
/// `id` is assigned by the store on creation and never changes afterwards.
/// `price` is always strictly positive; the HTTP layer rejects anything else
/// before a store call is made, and the Postgres table carries a `CHECK` too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The Product ID
    #[schema(example = 1)]
    pub id: i32,
    /// The Product name
    #[schema(example = "Kayn Snow Moon")]
    pub name: String,
    /// The Product Price
    #[schema(example = 15)]
    pub price: f64,
    /// The Product Availability
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a product. Availability is left to the store default.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Full replacement of the mutable fields of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl Product {
    /// Overwrites `name`, `price` and `availability` in place.
    pub fn apply(&mut self, changes: ProductChanges) {
        self.name = changes.name;
        self.price = changes.price;
        self.availability = changes.availability;
    }
}

/// Returns the product with its availability flipped.
pub fn toggle_availability(product: Product) -> Product {
    Product {
        availability: !product.availability,
        ..product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Monitor Curvo".to_string(),
            price: 300.0,
            availability: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn toggle_twice_restores_availability() {
        let original = sample();
        let once = toggle_availability(original.clone());
        assert!(!once.availability);
        let twice = toggle_availability(once);
        assert_eq!(twice, original);
    }

    #[test]
    fn apply_replaces_all_mutable_fields() {
        let mut product = sample();
        product.apply(ProductChanges {
            name: "Viseryon".to_string(),
            price: 7.0,
            availability: false,
        });
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Viseryon");
        assert_eq!(product.price, 7.0);
        assert!(!product.availability);
    }

    #[test]
    fn serializes_timestamps_in_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["availability"], serde_json::json!(true));
    }
}
