use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::diet::MergedPlan;

/// A cart line joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CartLine {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub quantity: i64,
}

/// One purchased product of a past order.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct HistoryLine {
    pub order_id: i64,
    pub order_time: DateTime<Utc>,
    pub product_id: i64,
    pub quantity: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MembershipStatus {
    Expired,
    #[serde(rename = "Not Expired")]
    NotExpired,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipView {
    pub id: i64,
    pub plan: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: MembershipStatus,
    /// Milliseconds until `end`, zero once expired.
    #[serde(rename = "timeLeft")]
    pub time_left: i64,
}

impl MembershipView {
    pub fn at(row: storage::models::MembershipRow, now: DateTime<Utc>) -> Self {
        let remaining = (row.end_date - now).num_milliseconds();
        let (status, time_left) = if row.end_date > now {
            (MembershipStatus::NotExpired, remaining.max(0))
        } else {
            (MembershipStatus::Expired, 0)
        };
        Self {
            id: row.id,
            plan: row.plan,
            start: row.start_date,
            end: row.end_date,
            status,
            time_left,
        }
    }
}

/// Body of a chart save request.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChart {
    pub chart_name: String,
    pub chart_data: Value,
    pub user_data: Value,
    pub goal: String,
    pub target_calories: i64,
}

/// An active chart with its JSON columns decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub id: i64,
    pub chart_name: String,
    pub goal: String,
    pub target_calories: i64,
    pub created_date: DateTime<Utc>,
    pub chart_data: Value,
    pub user_data: Value,
}

impl TryFrom<storage::models::DietChartRow> for ChartView {
    type Error = serde_json::Error;

    fn try_from(row: storage::models::DietChartRow) -> Result<Self, Self::Error> {
        Ok(Self {
            chart_data: serde_json::from_str(&row.chart_data)?,
            user_data: serde_json::from_str(&row.user_data)?,
            id: row.id,
            chart_name: row.chart_name,
            goal: row.goal,
            target_calories: row.target_calories,
            created_date: row.created_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedChart {
    pub id: i64,
    pub chart_name: String,
    pub goal: String,
    pub target_calories: i64,
    pub chart_data: MergedPlan,
}
