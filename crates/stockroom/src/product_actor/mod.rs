//! # Product Actor
//!
//! This module implements the Product resource actor: the inventory store.
//!
//! ## Overview
//!
//! The Product actor owns the catalog and the stock level of every product. Besides the
//! framework's create/get/list, it exposes three custom actions:
//!
//! ```rust,ignore
//! // Read the stock level (no durable write)
//! let stock = product_client.get_stock(id.clone()).await?;
//!
//! // Unchecked adjustment, returns the new level
//! let stock = product_client.adjust_stock(id.clone(), -3).await?;
//!
//! // Conditional decrement used by the order workflow
//! let product = product_client.reserve(id, 2).await?;
//! ```
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use actor_framework::Volatile;
//! use stockroom::clients::ProductClient;
//! use stockroom::model::{ProductCreate, ProductId};
//! use stockroom::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32, Box::new(Volatile))?;
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     client
//!         .add_product(ProductCreate {
//!             id: ProductId::new("W-1"),
//!             name: "Widget".to_string(),
//!             stock: 10,
//!             price: 2.5,
//!         })
//!         .await?;
//!
//!     let reserved = client.reserve(ProductId::new("W-1"), 4).await?;
//!     assert_eq!(reserved.stock, 6);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{FrameworkError, Persistence, ResourceActor, ResourceClient};

/// Creates a new Product actor, preloaded from `persistence`, and its client.
pub fn new(
    capacity: usize,
    persistence: Box<dyn Persistence<Product>>,
) -> Result<(ResourceActor<Product>, ResourceClient<Product>), FrameworkError> {
    ResourceActor::with_persistence(capacity, persistence)
}
