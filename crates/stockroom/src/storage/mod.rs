//! Durable storage for the actors and the metric log.
//!
//! The actors talk to storage only through [`Persistence`](actor_framework::Persistence);
//! [`SqliteStore`] is the one real backend.

pub mod sqlite;

pub use sqlite::SqliteStore;
