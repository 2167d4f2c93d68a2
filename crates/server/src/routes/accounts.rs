use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Shared;
use crate::error::AppError;
use crate::extract::AppJson;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn signup(
    State(state): State<Shared>,
    AppJson(req): AppJson<SignupRequest>,
) -> Result<Json<Value>, AppError> {
    state.accounts.signup(&req.name, &req.email, &req.password).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn login(
    State(state): State<Shared>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let name = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(json!({ "success": true, "userName": name })))
}
