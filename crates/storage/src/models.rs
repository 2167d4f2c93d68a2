use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct MembershipRow {
    pub id: i64,
    pub user_email: String,
    pub plan: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A stored diet chart; `chart_data` and `user_data` hold JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct DietChartRow {
    pub id: i64,
    pub user_email: String,
    pub chart_name: String,
    pub chart_data: String,
    pub user_data: String,
    pub goal: String,
    pub target_calories: i64,
    pub created_date: DateTime<Utc>,
    pub is_active: bool,
}
