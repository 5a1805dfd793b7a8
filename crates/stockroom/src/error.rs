//! # Error Classification
//!
//! Each actor has its own error enum ([`ProductError`](crate::product_actor::ProductError),
//! [`OrderError`](crate::order_actor::OrderError)). [`ErrorKind`] is the coarse class shared
//! by both, used by the HTTP layer to pick a status code.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced product or order does not exist.
    NotFound,
    /// A create reused an identifier.
    DuplicateKey,
    /// An order asked for more than is on hand.
    InsufficientStock,
    /// A stock adjustment overflowed the stock counter.
    OutOfRange,
    /// The durable store failed.
    StorageFailure,
    /// An actor was gone or did not answer in time.
    Unavailable,
}
