//! Error types for the Product actor.

use crate::error::ErrorKind;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A product with this id already exists.
    #[error("Product already exists: {0}")]
    DuplicateKey(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: i64 },

    /// An adjustment would move the stock level outside the representable range.
    #[error("Stock adjustment out of range: stock {stock}, delta {delta}")]
    StockOverflow { stock: i64, delta: i64 },

    /// The durable store rejected the change.
    #[error("Product storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::DuplicateKey(_) => ErrorKind::DuplicateKey,
            ProductError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            ProductError::StockOverflow { .. } => ErrorKind::OutOfRange,
            ProductError::Storage(_) => ErrorKind::StorageFailure,
            ProductError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<ProductError>() {
            Ok(own) => own,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(FrameworkError::DuplicateKey(id)) => ProductError::DuplicateKey(id),
            Err(FrameworkError::Storage(e)) => ProductError::Storage(e.to_string()),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
