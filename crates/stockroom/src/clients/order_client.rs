//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>`; the reservation itself happens in the Order actor's
//! `on_create` hook.
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places an order: reserves stock and records a `Pending` order priced at
    /// `quantity × price`.
    ///
    /// # Errors
    /// - `Product(NotFound)` / `Product(InsufficientStock)` when the reservation is refused;
    ///   stock is untouched
    /// - `Storage` if the order could not be recorded; the reserved units are put back
    #[instrument(skip(self, params), fields(product_id = %params.product_id, quantity = params.quantity))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create_order called");
        let order = self.inner.create(params).await?;
        info!(order_id = %order.id, total = order.total, "Order placed");
        Ok(order)
    }

    /// Every order, oldest first.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Overwrites the order's status with any string.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: String,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.update(id, OrderUpdate { status }).await?;
        Ok(order)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}
