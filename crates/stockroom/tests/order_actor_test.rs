use actor_framework::mock::{create_mock_client, expect_action, MockClient};
use actor_framework::{ActorClient, FrameworkError, Persistence, StorageError, Volatile};
use stockroom::clients::{OrderClient, ProductClient};
use stockroom::model::{Order, OrderCreate, OrderId, Product, ProductId};
use stockroom::order_actor::{self, OrderError};
use stockroom::product_actor::{ProductAction, ProductActionResult, ProductError};
use std::time::Duration;

/// Refuses every write.
struct ReadOnlyDisk;

impl Persistence<Order> for ReadOnlyDisk {
    fn load(&mut self) -> Result<Vec<Order>, StorageError> {
        Ok(Vec::new())
    }

    fn insert(&mut self, _item: &Order) -> Result<(), StorageError> {
        Err(StorageError::new("insert order", "read-only file system"))
    }

    fn update(&mut self, _item: &Order) -> Result<(), StorageError> {
        Err(StorageError::new("update order", "read-only file system"))
    }

    fn remove(&mut self, _id: &OrderId) -> Result<(), StorageError> {
        Err(StorageError::new("remove order", "read-only file system"))
    }
}

/// Accepts every write, slowly.
#[derive(Default)]
struct SlowDisk {
    rows: Vec<Order>,
}

impl Persistence<Order> for SlowDisk {
    fn load(&mut self) -> Result<Vec<Order>, StorageError> {
        Ok(self.rows.clone())
    }

    fn insert(&mut self, item: &Order) -> Result<(), StorageError> {
        std::thread::sleep(Duration::from_millis(200));
        self.rows.push(item.clone());
        Ok(())
    }

    fn update(&mut self, _item: &Order) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&mut self, _id: &OrderId) -> Result<(), StorageError> {
        Ok(())
    }
}

fn widget_after_reserve(stock: i64) -> Product {
    Product::new(ProductId::new("W-1"), "Widget", stock, 2.5)
}

fn order_for(quantity: u32) -> OrderCreate {
    OrderCreate {
        product_id: ProductId::new("W-1"),
        quantity,
    }
}

/// Integration test: Real Order actor with a mocked Product dependency.
/// This tests the Order actor's workflow (on_create) while isolating it from the Product actor.
///
/// Pattern 2: Actor + Mocks
/// - Real Order actor (tests actor logic in on_create)
/// - Mocked Product client (isolates the dependency)
#[tokio::test]
async fn test_order_actor_with_mocked_dependencies() {
    let mut product_mock = MockClient::<Product>::new();

    // Order::on_create will call product_client.reserve(), which is a perform_action()
    product_mock
        .expect_action(ProductId::new("W-1"))
        .return_ok(ProductActionResult::Reserve(widget_after_reserve(7)));

    let product_client = ProductClient::new(product_mock.client());

    let (order_actor, order_generic_client) = order_actor::new(8, Box::new(Volatile)).unwrap();
    let order_client = OrderClient::new(order_generic_client);
    let actor_handle = tokio::spawn(order_actor.run(product_client));

    let order = order_client.create_order(order_for(3)).await.unwrap();
    assert_eq!(order.id, OrderId(1));
    assert_eq!(order.total, 7.5);
    assert_eq!(order.status, "Pending");

    // The stored order is the priced one
    let stored = order_client.get(OrderId(1)).await.unwrap().unwrap();
    assert_eq!(stored, order);

    product_mock.verify();

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_refused_reservation_creates_no_order() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_action(ProductId::new("W-1"))
        .return_err(FrameworkError::EntityError(Box::new(
            ProductError::InsufficientStock {
                requested: 30,
                available: 10,
            },
        )));

    let (order_actor, client) = order_actor::new(8, Box::new(Volatile)).unwrap();
    let order_client = OrderClient::new(client);
    tokio::spawn(order_actor.run(ProductClient::new(product_mock.client())));

    let result = order_client.create_order(order_for(30)).await;
    assert_eq!(
        result,
        Err(OrderError::Product(ProductError::InsufficientStock {
            requested: 30,
            available: 10
        }))
    );
    assert!(order_client.get_orders().await.unwrap().is_empty());
    product_mock.verify();
}

#[tokio::test]
async fn test_zero_quantity_order_is_free() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_action(ProductId::new("W-1"))
        .return_ok(ProductActionResult::Reserve(widget_after_reserve(10)));

    let (order_actor, client) = order_actor::new(8, Box::new(Volatile)).unwrap();
    let order_client = OrderClient::new(client);
    tokio::spawn(order_actor.run(ProductClient::new(product_mock.client())));

    let order = order_client.create_order(order_for(0)).await.unwrap();
    assert_eq!(order.quantity, 0);
    assert_eq!(order.total, 0.0);
    product_mock.verify();
}

#[tokio::test]
async fn test_failed_order_write_releases_the_reservation() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_action(ProductId::new("W-1"))
        .return_ok(ProductActionResult::Reserve(widget_after_reserve(6)));
    // on_create_aborted gives the units back
    product_mock
        .expect_action(ProductId::new("W-1"))
        .return_ok(ProductActionResult::AdjustStock(10));

    let (order_actor, client) = order_actor::new(8, Box::new(ReadOnlyDisk)).unwrap();
    let order_client = OrderClient::new(client);
    tokio::spawn(order_actor.run(ProductClient::new(product_mock.client())));

    let result = order_client.create_order(order_for(4)).await;
    match result {
        Err(OrderError::Storage(msg)) => assert!(msg.contains("insert order")),
        other => panic!("expected storage failure, got {other:?}"),
    }
    assert!(order_client.get_orders().await.unwrap().is_empty());
    product_mock.verify();
}

#[tokio::test]
async fn test_status_update_on_missing_order() {
    let product_mock = MockClient::<Product>::new();
    let (order_actor, client) = order_actor::new(8, Box::new(Volatile)).unwrap();
    let order_client = OrderClient::new(client);
    tokio::spawn(order_actor.run(ProductClient::new(product_mock.client())));

    let result = order_client
        .update_order_status(OrderId(42), "Shipped".to_string())
        .await;
    assert_eq!(result, Err(OrderError::NotFound("42".to_string())));
}

#[tokio::test]
async fn test_slow_order_write_still_reports_the_placed_order() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_action(ProductId::new("W-1"))
        .return_ok(ProductActionResult::Reserve(widget_after_reserve(7)));

    let (order_actor, client) = order_actor::new(8, Box::new(SlowDisk::default())).unwrap();
    let order_client = OrderClient::new(client.clone().with_timeout(Duration::from_millis(50)));
    tokio::spawn(order_actor.run(ProductClient::new(product_mock.client())));

    // The write outlasts the deadline, but the order was committed, so the caller hears so
    let order = order_client.create_order(order_for(3)).await.unwrap();
    assert_eq!(order.total, 7.5);

    let orders = OrderClient::new(client).get_orders().await.unwrap();
    assert_eq!(orders, vec![order]);
    product_mock.verify();
}

#[tokio::test]
async fn test_order_past_deadline_after_reserving_gives_stock_back() {
    let (product_client, mut product_requests) = create_mock_client::<Product>(8);
    let (order_actor, client) = order_actor::new(8, Box::new(Volatile)).unwrap();
    let order_client = OrderClient::new(client.clone().with_timeout(Duration::from_millis(50)));
    tokio::spawn(order_actor.run(ProductClient::new(product_client)));

    let placing = tokio::spawn(async move { order_client.create_order(order_for(3)).await });

    // The product actor answers the reservation only after the caller's deadline
    let (id, action, respond_to) = expect_action(&mut product_requests)
        .await
        .expect("Expected Reserve request");
    assert_eq!(id, ProductId::new("W-1"));
    assert_eq!(action, ProductAction::Reserve(3));
    tokio::time::sleep(Duration::from_millis(100)).await;
    respond_to
        .send(Ok(ProductActionResult::Reserve(widget_after_reserve(7))))
        .unwrap();

    let (_, action, respond_to) = expect_action(&mut product_requests)
        .await
        .expect("Expected release request");
    assert_eq!(action, ProductAction::AdjustStock(3));
    respond_to.send(Ok(ProductActionResult::AdjustStock(10))).unwrap();

    let result = placing.await.unwrap();
    assert_eq!(
        result,
        Err(OrderError::ActorCommunicationError("Request timed out".to_string()))
    );
    assert!(OrderClient::new(client).get_orders().await.unwrap().is_empty());
}
