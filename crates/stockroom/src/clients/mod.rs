//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each wrapper turns the generic request/response API into domain calls with domain errors,
//! and gets `get`/`list`/`delete` from [`ActorClient`](actor_framework::ActorClient).

pub mod order_client;
pub mod product_client;

pub use order_client::*;
pub use product_client::*;
