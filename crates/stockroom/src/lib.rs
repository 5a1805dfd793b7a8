//! # Stockroom
//!
//! Inventory and order management on top of [`actor_framework`].
//!
//! - **[model]**: Pure data structures ([`Product`](model::Product), [`Order`](model::Order),
//!   [`Metric`](model::Metric)).
//! - **[product_actor]** / **[order_actor]**: the inventory store and the order workflow, as
//!   [`ActorEntity`](actor_framework::ActorEntity) implementations.
//! - **[clients]**: Type-safe wrappers (e.g. [`ProductClient`](clients::ProductClient)) that
//!   hide the message passing.
//! - **[analytics]**: the [`MetricRecorder`](analytics::MetricRecorder).
//! - **[storage]**: the SQLite backend behind both actors and the metric log.
//! - **[lifecycle]**: [`InventorySystem`](lifecycle::InventorySystem) wires and runs it all.
//! - **[http]**: the axum front end.
//!
//! Placing an order is one message to the order actor, whose `on_create` hook reserves stock
//! with one message to the product actor. The check and the decrement happen in that single
//! product message, so concurrent orders cannot oversell.

pub mod analytics;
pub mod clients;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod storage;
