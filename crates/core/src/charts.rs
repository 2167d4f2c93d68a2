use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use storage::models::DietChartRow;
use tracing::{info, warn};

use crate::diet::{self, ChartSummary, Goal};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{ChartView, MergedChart, NewChart};

const CHART_COLUMNS: &str =
    "id, user_email, chart_name, chart_data, user_data, goal, target_calories, created_date, is_active";

/// Saved diet charts. Deleting only deactivates a chart.
#[derive(Clone)]
pub struct DietCharts {
    pool: SqlitePool,
}

impl DietCharts {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn save(&self, email: &str, chart: NewChart, now: DateTime<Utc>) -> ServiceResult<i64> {
        if chart.chart_name.trim().is_empty()
            || chart.goal.trim().is_empty()
            || chart.chart_data.is_null()
            || chart.user_data.is_null()
        {
            return Err(ServiceError::invalid("Missing required data"));
        }
        let id = sqlx::query(
            r#"
            INSERT INTO diet_charts
                (user_email, chart_name, chart_data, user_data, goal, target_calories, created_date, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)
            "#,
        )
        .bind(email)
        .bind(chart.chart_name.trim())
        .bind(chart.chart_data.to_string())
        .bind(chart.user_data.to_string())
        .bind(chart.goal.trim())
        .bind(chart.target_calories)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        info!(%email, chart_id = id, "diet chart saved");
        Ok(id)
    }

    /// Active charts, newest first.
    pub async fn list(&self, email: &str) -> ServiceResult<Vec<ChartView>> {
        let rows = sqlx::query_as::<_, DietChartRow>(&format!(
            "SELECT {CHART_COLUMNS} FROM diet_charts \
             WHERE user_email = ?1 AND is_active = 1 \
             ORDER BY created_date DESC, id DESC"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|r| ChartView::try_from(r).map_err(ServiceError::from))
            .collect()
    }

    pub async fn delete(&self, email: &str, chart_id: i64) -> ServiceResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE diet_charts SET is_active = 0
            WHERE id = ?1 AND user_email = ?2 AND is_active = 1
            "#,
        )
        .bind(chart_id)
        .bind(email)
        .execute(&self.pool)
        .await?
        .rows_affected();
        if affected == 0 {
            return Err(ServiceError::not_found("Diet chart not found"));
        }
        info!(%email, chart_id, "diet chart removed");
        Ok(())
    }

    /// Synthesises one chart from the caller's selected active charts. All of
    /// the caller's active charts are deactivated and the merged chart becomes
    /// the only active one.
    pub async fn merge(
        &self,
        email: &str,
        selected: &[i64],
        goal: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<MergedChart> {
        if selected.is_empty() || goal.trim().is_empty() {
            return Err(ServiceError::invalid("Missing required data"));
        }
        let goal: Goal = goal
            .parse()
            .map_err(|e: diet::UnknownGoal| ServiceError::invalid(e.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {CHART_COLUMNS} FROM diet_charts WHERE user_email = "));
        qb.push_bind(email);
        qb.push(" AND is_active = 1 AND id IN (");
        let mut ids = qb.separated(", ");
        for id in selected {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
        let mut rows: Vec<DietChartRow> = qb.build_query_as().fetch_all(&mut *tx).await?;
        if rows.is_empty() {
            warn!(%email, ?selected, "merge requested with no usable charts");
            return Err(ServiceError::invalid("No valid charts found"));
        }
        // Selection order decides whose profile the merged chart inherits.
        rows.sort_by_key(|r| selected.iter().position(|id| *id == r.id));

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let chart_data: Value = serde_json::from_str(&row.chart_data)?;
            let user_data: Value = serde_json::from_str(&row.user_data)?;
            summaries.push(ChartSummary::from_stored(&chart_data, &user_data, row.target_calories));
        }
        let plan = diet::merge(&summaries, goal)
            .ok_or_else(|| ServiceError::invalid("No valid charts found"))?;
        let chart_name = diet::merged_chart_name(goal, rows.len());
        let user_data = rows[0].user_data.clone();

        sqlx::query("UPDATE diet_charts SET is_active = 0 WHERE user_email = ?1 AND is_active = 1")
            .bind(email)
            .execute(&mut *tx)
            .await?;

        let id = sqlx::query(
            r#"
            INSERT INTO diet_charts
                (user_email, chart_name, chart_data, user_data, goal, target_calories, created_date, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)
            "#,
        )
        .bind(email)
        .bind(&chart_name)
        .bind(serde_json::to_string(&plan)?)
        .bind(user_data)
        .bind(goal.as_str())
        .bind(plan.total_calories)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;
        info!(%email, chart_id = id, %goal, charts = rows.len(), target = plan.total_calories, "diet charts merged");

        Ok(MergedChart {
            id,
            chart_name,
            goal: goal.as_str().to_string(),
            target_calories: plan.total_calories,
            chart_data: plan,
        })
    }
}
