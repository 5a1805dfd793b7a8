//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every resource (Product, Order, …) must
//! implement to be managed by the generic `ResourceActor`. It specifies associated types for IDs,
//! DTOs, actions, context, and errors, and provides lifecycle hooks (`on_create`,
//! `on_create_aborted`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Identity
//! Resources come in two flavours:
//! - **Natural keys**: the caller chooses the id (a product SKU). `assign_id` reads it from the
//!   create payload and the actor rejects a second create with the same id.
//! - **Store-assigned keys**: the actor hands out a monotonically increasing `sequence`
//!   (an order number). `assign_id` wraps it, and `sequence` unwraps it again so the counter can
//!   be reseeded after loading from a durable store.
//!
//! # Provided Methods (Hooks)
//! You do **not** need to implement the provided hooks unless you want to customize behavior.
//! The default implementations do nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g., calling other actors).
/// It also defines a `Context` type, which is injected into every hook. This allows "Late Binding"
/// of dependencies (passing clients to `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., String, u64 newtype).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Reserve`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: `ProductError` is the union of every
    /// way a product operation can fail.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The id this entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Picks the id for a new entity.
    ///
    /// `sequence` is the actor's next counter value. Entities with natural keys ignore it and
    /// return the key carried by `params`.
    fn assign_id(params: &Self::Create, sequence: u64) -> Self::Id;

    /// The counter value this entity's id was built from, if any.
    ///
    /// After a durable load the actor resumes counting at `max(sequence) + 1`.
    fn sequence(&self) -> u64 {
        0
    }

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether `action` changes the entity. Read-only actions skip the durable write.
    fn action_mutates(_action: &Self::Action) -> bool {
        true
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and initialized.
    /// Use this hook to perform validation or side effects (e.g., checking other actors).
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when `on_create` succeeded but the entity could not be stored.
    ///
    /// Undo whatever side effects `on_create` had on other actors here.
    async fn on_create_aborted(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
