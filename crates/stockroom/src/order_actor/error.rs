//! Error types for the Order actor.

use crate::error::ErrorKind;
use crate::product_actor::ProductError;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Failures of the stock reservation keep their product-level detail through
/// [`OrderError::Product`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Reserving stock for the order failed (unknown product, insufficient stock, …).
    #[error(transparent)]
    Product(#[from] ProductError),

    /// The durable store rejected the change.
    #[error("Order storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::Product(e) => e.kind(),
            OrderError::Storage(_) => ErrorKind::StorageFailure,
            OrderError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<OrderError>() {
            Ok(own) => own,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Storage(e)) => OrderError::Storage(e.to_string()),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
