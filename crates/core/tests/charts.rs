use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use sqlx::{Row, SqlitePool};
use workoutvibes_core::charts::DietCharts;
use workoutvibes_core::models::NewChart;
use workoutvibes_core::ServiceError;

const EMAIL: &str = "planner@example.com";

async fn pool() -> SqlitePool {
    storage::open("sqlite::memory:").await.unwrap()
}

fn chart(name: &str, total: i64, preference: &str) -> NewChart {
    NewChart {
        chart_name: name.to_string(),
        chart_data: json!({ "meals": [], "totalCalories": total }),
        user_data: json!({ "age": 30, "dietaryPreferences": preference }),
        goal: "Maintenance".to_string(),
        target_calories: total,
    }
}

async fn active_count(pool: &SqlitePool) -> i64 {
    sqlx::query("SELECT COUNT(*) AS n FROM diet_charts WHERE user_email = ?1 AND is_active = 1")
        .bind(EMAIL)
        .fetch_one(pool)
        .await
        .unwrap()
        .get("n")
}

#[tokio::test]
async fn save_list_and_delete() {
    let charts = DietCharts::new(pool().await);
    let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
    let a = charts.save(EMAIL, chart("A", 2000, "vegetarian"), t0).await.unwrap();
    let b = charts
        .save(EMAIL, chart("B", 2400, "vegetarian"), t0 + Duration::minutes(5))
        .await
        .unwrap();

    let listed = charts.list(EMAIL).await.unwrap();
    assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![b, a]);
    assert_eq!(listed[0].chart_data["totalCalories"], json!(2400));
    assert_eq!(listed[0].user_data["age"], json!(30));

    charts.delete(EMAIL, a).await.unwrap();
    assert_eq!(charts.list(EMAIL).await.unwrap().len(), 1);
    assert!(matches!(charts.delete(EMAIL, a).await, Err(ServiceError::NotFound(_))));
    assert!(matches!(
        charts.delete("someone-else@example.com", b).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn save_requires_name_and_payloads() {
    let charts = DietCharts::new(pool().await);
    let mut blank = chart("", 2000, "vegetarian");
    assert!(matches!(
        charts.save(EMAIL, blank.clone(), Utc::now()).await,
        Err(ServiceError::InvalidInput(_))
    ));
    blank.chart_name = "ok".into();
    blank.chart_data = serde_json::Value::Null;
    assert!(charts.save(EMAIL, blank, Utc::now()).await.is_err());
}

#[tokio::test]
async fn merge_leaves_exactly_one_active_chart() {
    let pool = pool().await;
    let charts = DietCharts::new(pool.clone());
    let now = Utc::now();
    let a = charts.save(EMAIL, chart("A", 1800, "non-vegetarian"), now).await.unwrap();
    let b = charts.save(EMAIL, chart("B", 2200, "vegetarian"), now).await.unwrap();
    charts.save(EMAIL, chart("C", 2600, "vegetarian"), now).await.unwrap();

    let merged = charts.merge(EMAIL, &[a, b], "Weight Loss", now).await.unwrap();
    assert_eq!(merged.target_calories, 1800);
    assert_eq!(merged.chart_name, "Merged Diet Plan - Weight Loss (2 charts)");
    assert_eq!(merged.chart_data.meals[0].calories, 540);
    assert!(merged.chart_data.meals[0].foods.contains("Egg white omelet"));

    assert_eq!(active_count(&pool).await, 1);
    let listed = charts.list(EMAIL).await.unwrap();
    assert_eq!(listed[0].id, merged.id);
    assert_eq!(listed[0].goal, "Weight Loss");
    assert_eq!(listed[0].chart_data["chartsUsed"], json!(2));
    assert_eq!(listed[0].user_data["dietaryPreferences"], json!("non-vegetarian"));
}

#[tokio::test]
async fn merge_with_no_ids_fails_without_writing() {
    let pool = pool().await;
    let charts = DietCharts::new(pool.clone());
    charts.save(EMAIL, chart("A", 2000, "vegetarian"), Utc::now()).await.unwrap();

    assert!(matches!(
        charts.merge(EMAIL, &[], "Maintenance", Utc::now()).await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        charts.merge(EMAIL, &[4242], "Maintenance", Utc::now()).await,
        Err(ServiceError::InvalidInput(_))
    ));

    let total: i64 = sqlx::query("SELECT COUNT(*) AS n FROM diet_charts")
        .fetch_one(&pool)
        .await
        .unwrap()
        .get("n");
    assert_eq!(total, 1);
    assert_eq!(active_count(&pool).await, 1);
}

#[tokio::test]
async fn merge_rejects_unknown_goal_and_inactive_charts() {
    let charts = DietCharts::new(pool().await);
    let a = charts.save(EMAIL, chart("A", 2000, "vegetarian"), Utc::now()).await.unwrap();
    assert!(charts.merge(EMAIL, &[a], "Bulking", Utc::now()).await.is_err());

    charts.delete(EMAIL, a).await.unwrap();
    assert!(charts.merge(EMAIL, &[a], "Maintenance", Utc::now()).await.is_err());
}

#[tokio::test]
async fn merge_falls_back_to_stored_target_column() {
    let charts = DietCharts::new(pool().await);
    let mut bare = chart("bare", 0, "vegetarian");
    bare.chart_data = json!({ "meals": [] });
    bare.target_calories = 2100;
    let id = charts.save(EMAIL, bare, Utc::now()).await.unwrap();

    let merged = charts.merge(EMAIL, &[id], "Weight Gain", Utc::now()).await.unwrap();
    assert_eq!(merged.target_calories, 2400);
}
