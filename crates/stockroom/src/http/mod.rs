//! # HTTP Presentation Layer
//!
//! An axum [`Router`] over the [`InventorySystem`](crate::lifecycle::InventorySystem) clients.
//!
//! | Route | |
//! |---|---|
//! | `GET /`, `/add-product-form`, `/create-order-form` | HTML pages |
//! | `GET /view-products`, `/view-orders` | HTML listings |
//! | `POST /add-product`, `/create-order` | form or JSON body, `201` |
//! | `GET /api/products`, `/api/products/{id}`, `/api/products/{id}/stock` | |
//! | `POST /api/products/{id}/stock` | `{"delta": n}` |
//! | `GET /api/orders`, `/api/orders/{id}` | |
//! | `PUT /api/orders/{id}/status` | `{"status": "..."}` |
//! | `GET /api/metrics`, `POST /api/metrics` | `{"name": "...", "value": x}` |
//! | `GET /health` | |
//!
//! Errors are plain text; see [`ApiError`].

pub mod api;
pub mod error;
pub mod extract;
pub mod pages;

pub use error::ApiError;
pub use extract::Payload;

use crate::analytics::MetricRecorder;
use crate::clients::{OrderClient, ProductClient};
use crate::lifecycle::InventorySystem;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tera::Tera;

/// What every handler gets: the clients, the metric log and the compiled pages.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductClient,
    pub orders: OrderClient,
    pub metrics: MetricRecorder,
    templates: Arc<Tera>,
}

impl AppState {
    pub fn new(system: &InventorySystem) -> Result<Self, tera::Error> {
        Ok(Self {
            products: system.product_client.clone(),
            orders: system.order_client.clone(),
            metrics: system.metrics.clone(),
            templates: Arc::new(pages::templates()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/add-product-form", get(pages::add_product_form))
        .route("/create-order-form", get(pages::create_order_form))
        .route("/view-products", get(pages::view_products))
        .route("/view-orders", get(pages::view_orders))
        .route("/add-product", post(api::add_product))
        .route("/create-order", post(api::create_order))
        .route("/api/products", get(api::list_products))
        .route("/api/products/{id}", get(api::get_product))
        .route(
            "/api/products/{id}/stock",
            get(api::get_stock).post(api::adjust_stock),
        )
        .route("/api/orders", get(api::list_orders))
        .route("/api/orders/{id}", get(api::get_order))
        .route("/api/orders/{id}/status", put(api::update_order_status))
        .route(
            "/api/metrics",
            get(api::list_metrics).post(api::track_metric),
        )
        .route("/health", get(api::health))
        .with_state(state)
}
