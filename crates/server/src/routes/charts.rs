use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use workoutvibes_core::models::NewChart;

use super::{Shared, UserQuery};
use crate::error::AppError;
use crate::extract::{AppJson, AppQuery};

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    user_email: String,
    #[serde(default)]
    chart_name: String,
    #[serde(default)]
    chart_data: Value,
    #[serde(default)]
    user_data: Value,
    #[serde(default)]
    goal: String,
    target_calories: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    user_email: String,
    chart_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    #[serde(default)]
    user_email: String,
    #[serde(default)]
    selected_chart_ids: Vec<i64>,
    #[serde(default)]
    merge_goal: String,
}

pub async fn save(
    State(state): State<Shared>,
    AppJson(req): AppJson<SaveRequest>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&req.user_email).await?;
    let target_calories = req
        .target_calories
        .ok_or_else(|| AppError::bad_request("Missing required data"))?;
    let chart = NewChart {
        chart_name: req.chart_name,
        chart_data: req.chart_data,
        user_data: req.user_data,
        goal: req.goal,
        target_calories,
    };
    let id = state
        .charts
        .save(req.user_email.trim(), chart, Utc::now())
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Diet chart saved successfully",
        "chart_id": id,
    })))
}

pub async fn list(
    State(state): State<Shared>,
    AppQuery(q): AppQuery<UserQuery>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&q.user_email).await?;
    let charts = state.charts.list(q.user_email.trim()).await?;
    Ok(Json(json!({ "success": true, "charts": charts })))
}

pub async fn delete(
    State(state): State<Shared>,
    AppJson(req): AppJson<DeleteRequest>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&req.user_email).await?;
    let chart_id = req
        .chart_id
        .ok_or_else(|| AppError::bad_request("Missing required data"))?;
    state.charts.delete(req.user_email.trim(), chart_id).await?;
    Ok(Json(json!({ "success": true, "message": "Diet chart removed successfully" })))
}

pub async fn merge(
    State(state): State<Shared>,
    AppJson(req): AppJson<MergeRequest>,
) -> Result<Json<Value>, AppError> {
    state.accounts.require_user(&req.user_email).await?;
    let merged = state
        .charts
        .merge(
            req.user_email.trim(),
            &req.selected_chart_ids,
            &req.merge_goal,
            Utc::now(),
        )
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Diet charts merged successfully",
        "merged_chart": merged,
    })))
}
