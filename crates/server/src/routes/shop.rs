use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Shared, UserQuery};
use crate::error::AppError;
use crate::extract::{AppJson, AppQuery};

#[derive(Debug, Deserialize)]
pub struct CartRequest {
    #[serde(default)]
    user_email: String,
    product_id: Option<i64>,
    quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    user_email: String,
}

pub async fn products(State(state): State<Shared>) -> Result<Json<Value>, AppError> {
    let products = state.shop.list_products().await?;
    Ok(Json(json!({ "success": true, "products": products })))
}

pub async fn seed_demo(State(state): State<Shared>) -> Result<Json<Value>, AppError> {
    let added = state.shop.seed_demo_products().await?;
    Ok(Json(json!({ "success": true, "message": "Demo products added.", "added": added })))
}

pub async fn add_to_cart(
    State(state): State<Shared>,
    AppJson(req): AppJson<CartRequest>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&req.user_email).await?;
    let product_id = req
        .product_id
        .ok_or_else(|| AppError::bad_request("Missing required data"))?;
    state
        .shop
        .add_to_cart(req.user_email.trim(), product_id, req.quantity.unwrap_or(1))
        .await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn cart(
    State(state): State<Shared>,
    AppQuery(q): AppQuery<UserQuery>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&q.user_email).await?;
    let cart = state.shop.cart(q.user_email.trim()).await?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}

pub async fn remove_from_cart(
    State(state): State<Shared>,
    AppJson(req): AppJson<CartRequest>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&req.user_email).await?;
    let product_id = req
        .product_id
        .ok_or_else(|| AppError::bad_request("Missing required data"))?;
    state
        .shop
        .remove_from_cart(req.user_email.trim(), product_id)
        .await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn place_order(
    State(state): State<Shared>,
    AppJson(req): AppJson<OrderRequest>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&req.user_email).await?;
    let order_id = state
        .shop
        .place_order(req.user_email.trim(), Utc::now())
        .await?;
    Ok(Json(json!({ "success": true, "order_id": order_id })))
}

pub async fn history(
    State(state): State<Shared>,
    AppQuery(q): AppQuery<UserQuery>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&q.user_email).await?;
    let history = state.shop.order_history(q.user_email.trim()).await?;
    Ok(Json(json!({ "success": true, "history": history })))
}
