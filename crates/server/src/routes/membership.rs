use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use workoutvibes_core::membership::Plan;

use super::{Shared, UserQuery};
use crate::error::AppError;
use crate::extract::{AppJson, AppQuery};

#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    #[serde(default)]
    user_email: String,
    #[serde(default)]
    plan: String,
}

pub async fn buy(
    State(state): State<Shared>,
    AppJson(req): AppJson<BuyRequest>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&req.user_email).await?;
    let plan: Plan = req.plan.parse()?;
    let membership = state
        .memberships
        .buy(req.user_email.trim(), plan, Utc::now())
        .await?;
    Ok(Json(json!({ "success": true, "membership": membership })))
}

pub async fn history(
    State(state): State<Shared>,
    AppQuery(q): AppQuery<UserQuery>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&q.user_email).await?;
    let history = state
        .memberships
        .history(q.user_email.trim(), Utc::now())
        .await?;
    Ok(Json(json!({ "success": true, "history": history })))
}
