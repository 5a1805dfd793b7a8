//! Custom actions for the Product actor.
//!
//! This module defines the domain-specific operations (Actions) that can be performed
//! on a [`Product`](crate::model::Product) entity beyond creation and lookup.
//! These actions are handled by
//! [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action).

use crate::model::Product;

/// Custom actions for Product entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Adds `delta` (which may be negative) to the stock level. No lower bound is enforced.
    AdjustStock(i64),
    /// Takes `quantity` units out of stock if, and only if, that many are on hand.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` when the request exceeds the stock level; stock is
    /// unchanged.
    Reserve(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Result from CheckStock - the current stock level
    CheckStock(i64),
    /// Result from AdjustStock - the stock level after the adjustment
    AdjustStock(i64),
    /// Result from Reserve - the product as it stood when the units were taken
    /// (stock already decremented), so callers can price the reservation.
    Reserve(Product),
}
