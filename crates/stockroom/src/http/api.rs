//! JSON endpoints, plus the two form targets from the HTML pages.

use super::error::ApiError;
use super::extract::Payload;
use super::AppState;
use crate::model::{Metric, Order, OrderCreate, OrderId, Product, ProductCreate, ProductId};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, instrument};

/// Name of the metric recorded for every placed order.
pub const ORDER_TOTAL_METRIC: &str = "order_total";

#[derive(Debug, Deserialize)]
pub struct StockAdjustment {
    pub delta: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StockLevel {
    pub id: ProductId,
    pub stock: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MetricInput {
    pub name: String,
    pub value: f64,
}

#[instrument(skip(state, params), fields(product_id = %params.id))]
pub async fn add_product(
    State(state): State<AppState>,
    Payload(params): Payload<ProductCreate>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state.products.add_product(params).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added successfully" })),
    ))
}

#[instrument(skip(state, params), fields(product_id = %params.product_id))]
pub async fn create_order(
    State(state): State<AppState>,
    Payload(params): Payload<OrderCreate>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.orders.create_order(params).await?;
    state.metrics.track_metric(ORDER_TOTAL_METRIC, order.total).await;
    info!(order_id = %order.id, "Order created");
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list_products().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.products.get_product(ProductId(id)).await?))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StockLevel>, ApiError> {
    let id = ProductId(id);
    let stock = state.products.get_stock(id.clone()).await?;
    Ok(Json(StockLevel { id, stock }))
}

#[instrument(skip(state, change))]
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(change): Payload<StockAdjustment>,
) -> Result<Json<StockLevel>, ApiError> {
    let id = ProductId(id);
    let stock = state.products.adjust_stock(id.clone(), change.delta).await?;
    Ok(Json(StockLevel { id, stock }))
}

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.get_orders().await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get_order(OrderId(id)).await?))
}

#[instrument(skip(state, change))]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Payload(change): Payload<StatusChange>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .orders
        .update_order_status(OrderId(id), change.status)
        .await?;
    Ok(Json(order))
}

pub async fn list_metrics(State(state): State<AppState>) -> Json<Vec<Metric>> {
    Json(state.metrics.metrics())
}

pub async fn track_metric(
    State(state): State<AppState>,
    Payload(input): Payload<MetricInput>,
) -> (StatusCode, Json<Metric>) {
    let metric = state.metrics.track_metric(input.name, input.value).await;
    (StatusCode::CREATED, Json(metric))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
