//! # Order Actor
//!
//! The order workflow: placing an order reserves stock on the product actor and records the
//! priced order; orders can be listed, fetched and have their status overwritten.
//!
//! The actor's context is a [`ProductClient`](crate::clients::ProductClient), injected at
//! `run()` time:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32, Box::new(Volatile))?;
//! tokio::spawn(order_actor.run(product_client.clone()));
//! ```
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Order;
use actor_framework::{FrameworkError, Persistence, ResourceActor, ResourceClient};

/// Creates a new Order actor, preloaded from `persistence`, and its client.
///
/// Order ids continue after the highest id found in `persistence`.
pub fn new(
    capacity: usize,
    persistence: Box<dyn Persistence<Order>>,
) -> Result<(ResourceActor<Order>, ResourceClient<Order>), FrameworkError> {
    ResourceActor::with_persistence(capacity, persistence)
}
