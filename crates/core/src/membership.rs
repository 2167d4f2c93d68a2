use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use storage::models::MembershipRow;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::models::MembershipView;

const DAYS_PER_MONTH: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    OneMonth,
    SixMonths,
    OneYear,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::OneMonth => "1month",
            Plan::SixMonths => "6months",
            Plan::OneYear => "1year",
        }
    }

    pub fn months(&self) -> i64 {
        match self {
            Plan::OneMonth => 1,
            Plan::SixMonths => 6,
            Plan::OneYear => 12,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::days(DAYS_PER_MONTH * self.months())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1month" => Ok(Plan::OneMonth),
            "6months" => Ok(Plan::SixMonths),
            "1year" => Ok(Plan::OneYear),
            other => Err(ServiceError::invalid(format!("Unknown membership plan '{other}'"))),
        }
    }
}

#[derive(Clone)]
pub struct Memberships {
    pool: SqlitePool,
}

impl Memberships {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn buy(&self, email: &str, plan: Plan, now: DateTime<Utc>) -> ServiceResult<MembershipView> {
        let end = now + plan.duration();
        let id = sqlx::query(
            r#"
            INSERT INTO memberships (user_email, plan, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(email)
        .bind(plan.as_str())
        .bind(now)
        .bind(end)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        info!(%email, %plan, "membership purchased");

        let row = MembershipRow {
            id,
            user_email: email.to_string(),
            plan: plan.as_str().to_string(),
            start_date: now,
            end_date: end,
        };
        Ok(MembershipView::at(row, now))
    }

    /// Newest first, with status and time left measured against `now`.
    pub async fn history(&self, email: &str, now: DateTime<Utc>) -> ServiceResult<Vec<MembershipView>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, user_email, plan, start_date, end_date
            FROM memberships
            WHERE user_email = ?1
            ORDER BY start_date DESC, id DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| MembershipView::at(r, now)).collect())
    }
}
