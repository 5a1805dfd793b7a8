//! Customer orders.
//!
//! [`Order`] implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`crate::order_actor`], created from an [`OrderCreate`] and updated with an
//! [`OrderUpdate`].

use crate::model::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Status every order starts in.
pub const PENDING: &str = "Pending";

/// Store-assigned identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// `quantity × price` at creation time; never recomputed.
    pub total: f64,
    /// Free-form. Any value may replace any other.
    pub status: String,
    /// Unix timestamp, seconds.
    pub created_at: i64,
}

impl Order {
    /// Creates a new Order instance in the [`PENDING`] state.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (assigned by the actor system)
    /// * `product_id` - ID of the product being ordered
    /// * `quantity` - Units ordered
    /// * `total` - Total price for the order
    pub fn new(id: OrderId, product_id: ProductId, quantity: u32, total: f64) -> Self {
        Self {
            id,
            product_id,
            quantity,
            total,
            status: PENDING.to_string(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Payload for placing a new order: the candidate the workflow checks against stock.
///
/// Field names match the create-order form (`product_id`, `quantity`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for overwriting an order's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: String,
}
