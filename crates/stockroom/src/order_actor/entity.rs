//! ActorEntity trait implementation for the Order domain type.
//!
//! Placing an order is a single `Create` on the order actor. The `on_create` hook asks the
//! product actor to [`reserve`](crate::clients::ProductClient::reserve) the units, which checks
//! and decrements stock in one message, then prices the order from the reserved product.
//! If the order cannot be written, `on_create_aborted` puts the units back.

use super::error::OrderError;
use crate::clients::ProductClient;
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::{debug, error, info};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = Infallible;
    type ActionResult = Infallible;
    type Context = ProductClient;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn assign_id(_params: &OrderCreate, sequence: u64) -> OrderId {
        OrderId(sequence)
    }

    fn sequence(&self) -> u64 {
        self.id.0
    }

    /// Builds an unpriced order; `on_create` fills in the total.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Self::new(id, params.product_id, params.quantity, 0.0))
    }

    async fn on_create(&mut self, products: &ProductClient) -> Result<(), OrderError> {
        debug!(order_id = %self.id, product_id = %self.product_id, quantity = self.quantity, "Reserving stock");
        let product = products
            .reserve(self.product_id.clone(), self.quantity)
            .await?;
        self.total = f64::from(self.quantity) * product.price;
        info!(order_id = %self.id, product_id = %self.product_id, total = self.total, "Stock reserved");
        Ok(())
    }

    async fn on_create_aborted(&self, products: &ProductClient) -> Result<(), OrderError> {
        let restored = products
            .adjust_stock(self.product_id.clone(), i64::from(self.quantity))
            .await
            .inspect_err(|e| {
                error!(order_id = %self.id, product_id = %self.product_id, error = %e, "Stock could not be restored")
            })?;
        info!(order_id = %self.id, product_id = %self.product_id, stock = restored, "Reservation released");
        Ok(())
    }

    /// Overwrites the status. Any value may replace any other.
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &ProductClient) -> Result<(), OrderError> {
        self.status = update.status;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _ctx: &ProductClient,
    ) -> Result<Infallible, OrderError> {
        match action {}
    }
}
