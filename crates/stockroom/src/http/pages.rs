//! HTML pages: the landing page, the two entry forms and the two listings.

use super::error::ApiError;
use super::AppState;
use actor_framework::ActorClient;
use axum::extract::State;
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    (
        "add_product_form.html",
        include_str!("../../templates/add_product_form.html"),
    ),
    (
        "create_order_form.html",
        include_str!("../../templates/create_order_form.html"),
    ),
    (
        "view_products.html",
        include_str!("../../templates/view_products.html"),
    ),
    (
        "view_orders.html",
        include_str!("../../templates/view_orders.html"),
    ),
];

/// Compiles the embedded page templates. Names end in `.html`, so output is autoescaped.
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(tera)
}

#[derive(Serialize)]
struct Card {
    title: &'static str,
    text: &'static str,
    href: &'static str,
}

const CARDS: [Card; 4] = [
    Card {
        title: "Add Product",
        text: "Add a new product to the inventory.",
        href: "/add-product-form",
    },
    Card {
        title: "Create Order",
        text: "Place a new order for a product.",
        href: "/create-order-form",
    },
    Card {
        title: "View Products",
        text: "Check the list of available products.",
        href: "/view-products",
    },
    Card {
        title: "View Orders",
        text: "Check the list of all orders.",
        href: "/view-orders",
    },
];

fn render(state: &AppState, name: &str, context: &Context) -> Result<Html<String>, ApiError> {
    Ok(Html(state.templates.render(name, context)?))
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    context.insert("cards", &CARDS);
    render(&state, "index.html", &context)
}

pub async fn add_product_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, "add_product_form.html", &Context::new())
}

pub async fn create_order_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, "create_order_form.html", &Context::new())
}

pub async fn view_products(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let products = state.products.list().await?;
    let mut context = Context::new();
    context.insert("products", &products);
    render(&state, "view_products.html", &context)
}

pub async fn view_orders(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let orders = state.orders.list().await?;
    let mut context = Context::new();
    context.insert("orders", &orders);
    render(&state, "view_orders.html", &context)
}
