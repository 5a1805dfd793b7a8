//! ActorEntity trait implementation for the Product domain type.
//!
//! Products are keyed by the caller-chosen [`ProductId`]; the actor's sequence counter is
//! not used for them. The stock level only moves through [`ProductAction`]s.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = Infallible;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn assign_id(params: &ProductCreate, _sequence: u64) -> ProductId {
        params.id.clone()
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        Ok(Self::new(id, params.name, params.stock, params.price))
    }

    fn action_mutates(action: &ProductAction) -> bool {
        !matches!(action, ProductAction::CheckStock)
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), ProductError> {
        match update {}
    }

    /// Handles custom actions for the Product entity.
    ///
    /// `Reserve` compares and decrements inside the same message, so two reservations
    /// for the same product can never both observe the same stock level.
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::AdjustStock(delta) => {
                self.stock = self
                    .stock
                    .checked_add(delta)
                    .ok_or(ProductError::StockOverflow {
                        stock: self.stock,
                        delta,
                    })?;
                Ok(ProductActionResult::AdjustStock(self.stock))
            }
            ProductAction::Reserve(quantity) => {
                if self.stock < i64::from(quantity) {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= i64::from(quantity);
                Ok(ProductActionResult::Reserve(self.clone()))
            }
        }
    }
}
