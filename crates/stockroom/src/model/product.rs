//! Products in the inventory.
//!
//! [`Product`] implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`crate::product_actor`], with [`ProductCreate`] as its creation payload and
//! [`ProductAction`](crate::product_actor::ProductAction) for stock movements.
//! A product is never updated wholesale; its stock moves only through actions.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Caller-chosen identifier for Products (a SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Units on hand. Orders never take this below zero; direct adjustments can.
    pub stock: i64,
    pub price: f64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier chosen by the caller
    /// * `name` - Product name
    /// * `stock` - Units on hand
    /// * `price` - Unit price
    pub fn new(id: ProductId, name: impl Into<String>, stock: i64, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
            price,
        }
    }
}

/// Payload for registering a new product.
///
/// Field names match the add-product form (`id`, `name`, `stock`, `price`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub id: ProductId,
    pub name: String,
    pub stock: i64,
    pub price: f64,
}
