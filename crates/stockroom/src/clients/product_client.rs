//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes the inventory store operations.
use crate::model::{Product, ProductCreate, ProductId};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from(e)
    }
}

/// An action answered with a result for a different action.
fn mismatched(expected: &str, got: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("{expected} answered with {got:?}"))
}

impl ProductClient {
    /// Registers a new product. Fails with `DuplicateKey` if the id is taken.
    #[instrument(skip(self, params), fields(product_id = %params.id))]
    pub async fn add_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(ProductError::from)
    }

    /// Fetches a product, failing with `NotFound` instead of returning `None`.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .get(id.clone())
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Every product, in the order they were added.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.list().await
    }

    /// Current stock level for a product.
    #[instrument(skip(self))]
    pub async fn get_stock(&self, id: ProductId) -> Result<i64, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(mismatched("CheckStock", other)),
        }
    }

    /// Adds `delta` to the stock level and returns the new level.
    ///
    /// This is the unchecked administrative adjustment: a negative delta may take stock
    /// below zero. Orders go through [`ProductClient::reserve`] instead. Only a result outside
    /// the `i64` range is refused, with `StockOverflow`.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: ProductId, delta: i64) -> Result<i64, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ProductAction::AdjustStock(delta))
            .await?
        {
            ProductActionResult::AdjustStock(level) => Ok(level),
            other => Err(mismatched("AdjustStock", other)),
        }
    }

    /// Takes `quantity` units if that many are on hand, returning the product afterwards.
    ///
    /// # Errors
    /// - `NotFound` if the product does not exist
    /// - `InsufficientStock` if fewer than `quantity` units are on hand (nothing is taken)
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: ProductId, quantity: u32) -> Result<Product, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ProductAction::Reserve(quantity))
            .await?
        {
            ProductActionResult::Reserve(product) => Ok(product),
            other => Err(mismatched("Reserve", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action, expect_create, MockClient};

    fn widget(stock: i64) -> Product {
        Product::new(ProductId::new("W-1"), "Widget", stock, 2.5)
    }

    #[tokio::test]
    async fn test_get_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task =
            tokio::spawn(async move { product_client.get_stock(ProductId::new("W-1")).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, ProductId::new("W-1"));
        assert_eq!(action, ProductAction::CheckStock);

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        let result = check_task.await.unwrap();
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_add_product_sends_payload() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let add_task = tokio::spawn(async move {
            product_client
                .add_product(ProductCreate {
                    id: ProductId::new("W-1"),
                    name: "Widget".to_string(),
                    stock: 7,
                    price: 2.5,
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.stock, 7);
        responder.send(Ok(widget(7))).unwrap();

        assert_eq!(add_task.await.unwrap().unwrap(), widget(7));
    }

    #[tokio::test]
    async fn test_reserve_success() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId::new("W-1"))
            .return_ok(ProductActionResult::Reserve(widget(3)));

        let product_client = ProductClient::new(mock.client());
        let product = product_client.reserve(ProductId::new("W-1"), 2).await.unwrap();

        assert_eq!(product.stock, 3);
        mock.verify();
    }

    #[tokio::test]
    async fn test_reserve_insufficient_stock_keeps_detail() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId::new("W-1"))
            .return_err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    requested: 100,
                    available: 5,
                },
            )));

        let product_client = ProductClient::new(mock.client());
        let result = product_client.reserve(ProductId::new("W-1"), 100).await;

        assert_eq!(
            result,
            Err(ProductError::InsufficientStock {
                requested: 100,
                available: 5
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId::new("ghost")).return_ok(None);
        mock.expect_action(ProductId::new("ghost"))
            .return_err(FrameworkError::NotFound("ghost".to_string()));

        let product_client = ProductClient::new(mock.client());
        assert_eq!(
            product_client.get_product(ProductId::new("ghost")).await,
            Err(ProductError::NotFound("ghost".to_string()))
        );
        assert_eq!(
            product_client.adjust_stock(ProductId::new("ghost"), 5).await,
            Err(ProductError::NotFound("ghost".to_string()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Product>(1);
        drop(receiver);

        let result = ProductClient::new(client).list_products().await;
        assert!(matches!(
            result,
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
