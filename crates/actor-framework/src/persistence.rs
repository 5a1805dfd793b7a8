//! # Write-through Persistence
//!
//! A `ResourceActor` keeps its entities in memory and writes every change through a
//! [`Persistence`] backend before committing it. The backend is owned by the actor task, so
//! calls are never concurrent for one resource type.
//!
//! [`Volatile`] is the no-op backend used when nothing should outlive the process.

use crate::entity::ActorEntity;

/// A failure reported by a persistence backend, wrapped with what was being attempted.
#[derive(Debug, thiserror::Error)]
#[error("Storage failure during {context}: {source}")]
pub struct StorageError {
    context: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl StorageError {
    pub fn new<E>(context: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }

    /// What the backend was doing when it failed (e.g. "insert product").
    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Durable backing for a single resource type.
///
/// Every method is called from inside the actor loop; a returned error aborts the request and
/// leaves the in-memory state as it was.
pub trait Persistence<T: ActorEntity>: Send + 'static {
    /// Returns every stored entity, in the backend's natural order.
    fn load(&mut self) -> Result<Vec<T>, StorageError>;

    fn insert(&mut self, item: &T) -> Result<(), StorageError>;

    fn update(&mut self, item: &T) -> Result<(), StorageError>;

    fn remove(&mut self, id: &T::Id) -> Result<(), StorageError>;
}

/// Keeps nothing. Entities live as long as the actor does.
#[derive(Debug, Default, Clone, Copy)]
pub struct Volatile;

impl<T: ActorEntity> Persistence<T> for Volatile {
    fn load(&mut self) -> Result<Vec<T>, StorageError> {
        Ok(Vec::new())
    }

    fn insert(&mut self, _item: &T) -> Result<(), StorageError> {
        Ok(())
    }

    fn update(&mut self, _item: &T) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&mut self, _id: &T::Id) -> Result<(), StorageError> {
        Ok(())
    }
}
