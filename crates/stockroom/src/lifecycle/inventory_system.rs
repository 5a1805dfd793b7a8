use crate::analytics::MetricRecorder;
use crate::clients::{OrderClient, ProductClient};
use crate::config::ActorSettings;
use crate::model::{Order, Product};
use crate::storage::SqliteStore;
use crate::{order_actor, product_actor};
use actor_framework::{FrameworkError, ResourceActor, ResourceClient};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The running inventory service: both actors plus the metric log.
///
/// `InventorySystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the product and order actors
/// - **Dependency Wiring**: Handing the order actor a product client as its context
/// - **Shared State**: Owning the one [`MetricRecorder`] every handler appends to
///
/// # Example
///
/// ```ignore
/// let system = InventorySystem::new();
///
/// system.product_client.add_product(widget).await?;
/// let order = system.order_client.create_order(params).await?;
/// system.metrics.track_metric("order_total", order.total).await;
///
/// system.shutdown().await?;
/// ```
pub struct InventorySystem {
    /// Client for the Product actor (the inventory store)
    pub product_client: ProductClient,

    /// Client for the Order actor (the order workflow)
    pub order_client: OrderClient,

    pub metrics: MetricRecorder,

    /// Task handles for the running actors, order actor first
    handles: Vec<JoinHandle<()>>,
}

impl InventorySystem {
    /// Starts an in-memory system; nothing survives the process.
    pub fn new() -> Self {
        let settings = ActorSettings::default();
        let (product_actor, product_client) = ResourceActor::new(settings.channel_capacity);
        let (order_actor, order_client) = ResourceActor::new(settings.channel_capacity);
        Self::start(
            (product_actor, product_client),
            (order_actor, order_client),
            MetricRecorder::new(),
            settings,
        )
    }

    /// Starts a system backed by `store`, picking up the products and orders it already holds.
    pub fn with_store(store: SqliteStore, settings: ActorSettings) -> Result<Self, FrameworkError> {
        let products = product_actor::new(settings.channel_capacity, Box::new(store.clone()))?;
        let orders = order_actor::new(settings.channel_capacity, Box::new(store.clone()))?;
        info!(
            products = products.0.len(),
            orders = orders.0.len(),
            "Loaded inventory"
        );
        Ok(Self::start(
            products,
            orders,
            MetricRecorder::with_sink(store),
            settings,
        ))
    }

    fn start(
        (product_actor, product_client): (ResourceActor<Product>, ResourceClient<Product>),
        (order_actor, order_client): (ResourceActor<Order>, ResourceClient<Order>),
        metrics: MetricRecorder,
        settings: ActorSettings,
    ) -> Self {
        let product_handle = tokio::spawn(product_actor.run(()));

        // The order actor's own product client never times out: a reservation that lands after
        // its caller gave up would never be released.
        let order_handle =
            tokio::spawn(order_actor.run(ProductClient::new(product_client.clone())));

        let (product_client, order_client) = match settings.request_timeout {
            Some(limit) => (
                product_client.with_timeout(limit),
                order_client.with_timeout(limit),
            ),
            None => (product_client, order_client),
        };

        info!(
            channel_capacity = settings.channel_capacity,
            request_timeout_ms = settings.request_timeout.map(|t| t.as_millis() as u64),
            "Inventory system started"
        );

        Self {
            product_client: ProductClient::new(product_client),
            order_client: OrderClient::new(order_client),
            metrics,
            handles: vec![order_handle, product_handle],
        }
    }

    /// Gracefully shuts down both actors.
    ///
    /// Dropping the clients closes the channels; each actor drains what is queued and exits.
    /// The order actor goes first, which releases the product client it holds. Clones of the
    /// clients that are still alive elsewhere keep their actor running, so drop those first.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down inventory system...");

        drop(self.order_client);
        drop(self.product_client);
        drop(self.metrics);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("Inventory system shutdown complete.");
        Ok(())
    }
}

impl Default for InventorySystem {
    fn default() -> Self {
        Self::new()
    }
}
