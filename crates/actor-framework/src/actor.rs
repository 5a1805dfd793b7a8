//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the core component that manages the lifecycle
//! and state of entities. It implements the "Server" side of the Actor Model, processing
//! messages sequentially and ensuring exclusive access to the entity store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::persistence::{Persistence, Volatile};
use indexmap::IndexMap;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`), the
/// persistence backend, and the receiver end of the channel. Each actor processes its own
/// messages *sequentially*, so a check-then-modify sequence inside one message (an action
/// handler, a create hook) is atomic with respect to every other request for the same
/// resource type. No `Mutex` is needed around `store`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` (or `with_persistence()`) to get the `actor`
///     (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Bin { id: u64, label: String }
/// #[derive(Debug)] struct BinCreate { label: String }
/// #[derive(Debug, thiserror::Error)] #[error("bin error")] struct BinError;
///
/// #[async_trait]
/// impl ActorEntity for Bin {
///     type Id = u64;
///     type Create = BinCreate;
///     type Update = ();
///     type Action = ();
///     type ActionResult = ();
///     type Context = (); // No dependencies in this example
///     type Error = BinError;
///
///     fn id(&self) -> &u64 { &self.id }
///     fn assign_id(_: &BinCreate, sequence: u64) -> u64 { sequence }
///     fn sequence(&self) -> u64 { self.id }
///     fn from_create_params(id: u64, p: BinCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, label: p.label })
///     }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Bin>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let bin = client.create(BinCreate { label: "A1".into() }).await.unwrap();
///     assert_eq!(bin.id, 1);
/// }
/// ```
///
/// # Implementation Details
///
/// * **Create**:
///     1. Fails with `Timeout` if the request's deadline has already passed.
///     2. Picks the id with `T::assign_id`. The `next_sequence` counter only advances once the
///        entity is stored, so rejected creates leave no gaps.
///     3. Rejects ids that are already present with `DuplicateKey`.
///     4. Calls `T::from_create_params`, then the `on_create` hook.
///     5. Checks the deadline again, then writes the entity through to persistence. If the
///        deadline passed or the write fails, `on_create_aborted` runs so the entity can undo
///        side effects of `on_create`.
///     6. Inserts into `store` and returns the stored entity, even if the write itself ran past
///        the deadline.
///
/// * **Update / Action**: the hook runs against a working copy; the copy is persisted and only
///   then replaces the stored entity. Actions for which `T::action_mutates` is false are
///   applied without a durable write.
///
/// * **Delete**: `on_delete`, durable removal, then removal from `store`.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    persistence: Box<dyn Persistence<T>>,
    next_sequence: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new in-memory `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: IndexMap::new(),
            persistence: Box::new(Volatile),
            next_sequence: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Creates an actor backed by `persistence`, preloaded with everything it holds.
    pub fn with_persistence(
        buffer_size: usize,
        mut persistence: Box<dyn Persistence<T>>,
    ) -> Result<(Self, ResourceClient<T>), FrameworkError> {
        let existing = persistence.load()?;
        let next_sequence = existing.iter().map(T::sequence).max().unwrap_or(0) + 1;
        let store = existing
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect::<IndexMap<_, _>>();

        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            persistence,
            next_sequence,
        };
        Ok((actor, ResourceClient::new(sender)))
    }

    /// Number of entities currently held.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Product" instead of "stockroom::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create {
                    params,
                    deadline,
                    respond_to,
                } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, deadline, &context, entity_type).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(id, update, &context, entity_type).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(id, &context, entity_type).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(id, action, &context, entity_type).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        deadline: Option<Instant>,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T, FrameworkError> {
        let expired = || deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if expired() {
            warn!(entity_type, "Deadline passed before create started");
            return Err(FrameworkError::Timeout);
        }

        let id = T::assign_id(&params, self.next_sequence);

        if self.store.contains_key(&id) {
            warn!(entity_type, %id, "Duplicate key");
            return Err(FrameworkError::DuplicateKey(id.to_string()));
        }

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;

        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, %id, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        if expired() {
            warn!(entity_type, %id, "Deadline passed, aborting create");
            Self::abort_create(&item, context, entity_type).await;
            return Err(FrameworkError::Timeout);
        }

        if let Err(e) = self.persistence.insert(&item) {
            warn!(entity_type, %id, error = %e, "Persist failed, aborting create");
            Self::abort_create(&item, context, entity_type).await;
            return Err(FrameworkError::Storage(e));
        }

        self.next_sequence += 1;
        self.store.insert(id.clone(), item.clone());
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(item)
    }

    async fn abort_create(item: &T, context: &T::Context, entity_type: &str) {
        if let Err(undo) = item.on_create_aborted(context).await {
            warn!(entity_type, id = %item.id(), error = %undo, "on_create_aborted failed");
        }
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T, FrameworkError> {
        let Some(current) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let mut working = current.clone();
        if let Err(e) = working.on_update(update, context).await {
            warn!(entity_type, %id, error = %e, "Update failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        if let Err(e) = self.persistence.update(&working) {
            warn!(entity_type, %id, error = %e, "Persist failed");
            return Err(FrameworkError::Storage(e));
        }

        self.store.insert(id.clone(), working.clone());
        info!(entity_type, %id, "Updated");
        Ok(working)
    }

    async fn delete(
        &mut self,
        id: T::Id,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<(), FrameworkError> {
        let Some(item) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        if let Err(e) = self.persistence.remove(&id) {
            warn!(entity_type, %id, error = %e, "Persist failed");
            return Err(FrameworkError::Storage(e));
        }

        self.store.shift_remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T::ActionResult, FrameworkError> {
        let Some(current) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let mutates = T::action_mutates(&action);
        let mut working = current.clone();
        let result = match working.handle_action(action, context).await {
            Ok(result) => result,
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Action failed");
                return Err(FrameworkError::EntityError(Box::new(e)));
            }
        };

        if mutates {
            if let Err(e) = self.persistence.update(&working) {
                warn!(entity_type, %id, error = %e, "Persist failed");
                return Err(FrameworkError::Storage(e));
            }
            self.store.insert(id.clone(), working);
        }

        info!(entity_type, %id, "Action ok");
        Ok(result)
    }
}
