use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;

pub mod accounts;
pub mod charts;
pub mod food;
pub mod membership;
pub mod shop;

pub type Shared = Arc<AppState>;

/// Query string carrying the caller's email.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub user_email: String,
}

pub fn router() -> Router<Shared> {
    Router::new()
        .route("/health", get(health))
        .route("/api/signup", post(accounts::signup))
        .route("/api/login", post(accounts::login))
        .route("/api/products", get(shop::products))
        .route("/api/demo-products", post(shop::seed_demo).get(shop::seed_demo))
        .route(
            "/api/cart",
            post(shop::add_to_cart)
                .get(shop::cart)
                .delete(shop::remove_from_cart),
        )
        .route("/api/order", post(shop::place_order))
        .route("/api/history", get(shop::history))
        .route("/api/membership/buy", post(membership::buy))
        .route("/api/membership/history", get(membership::history))
        .route("/api/diet-chart/save", post(charts::save))
        .route("/api/diet-chart/list", get(charts::list))
        .route("/api/diet-chart/delete", axum::routing::delete(charts::delete))
        .route("/api/diet-chart/merge", post(charts::merge))
        .route("/api/analyze-food", post(food::analyze))
}

async fn health() -> Json<Value> {
    Json(json!({ "success": true }))
}
