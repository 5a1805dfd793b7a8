//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the inventory service: starting, wiring and
//! shutting down the product and order actors.
//!
//! ## The InventorySystem Pattern
//!
//! [`InventorySystem`] is the one place the actors meet:
//!
//! ```rust,ignore
//! // 1. Create actors (no dependencies yet)
//! let (product_actor, product_client) = product_actor::new(32, Box::new(store.clone()))?;
//! let (order_actor, order_client) = order_actor::new(32, Box::new(store.clone()))?;
//!
//! // 2. Start actors with their dependencies injected
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(order_actor.run(ProductClient::new(product_client.clone())));
//! ```
//!
//! ## Dependency Injection via Context
//!
//! Actors are built without their dependencies and receive them in `run(context)`. The order
//! actor's context is a [`ProductClient`](crate::clients::ProductClient); the product actor
//! needs nothing (`Context = ()`).
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - Wait for both actor tasks to finish
//!
//! The dependency graph is acyclic (orders → products), so channel closure is enough: once the
//! order actor exits it drops its product client, and the product actor follows.
//!
//! ## Observability
//!
//! See [`setup_tracing`].

pub mod inventory_system;
pub mod tracing;

pub use self::inventory_system::*;
pub use self::tracing::*;
