use std::io::Cursor;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use workoutvibes_core::config::AppConfig;
use workoutvibes_server::app;
use workoutvibes_server::state::AppState;

const EMAIL: &str = "ravi@example.com";

async fn server() -> TestServer {
    let pool = storage::open("sqlite::memory:").await.unwrap();
    let mut cfg = AppConfig::default();
    cfg.auth.pbkdf2_rounds = 1_000;
    cfg.detector.seed = Some(7);
    cfg.detector.nutrition_variation = false;
    TestServer::new(app(AppState::new(pool, cfg))).unwrap()
}

async fn registered() -> TestServer {
    let server = server().await;
    server
        .post("/api/signup")
        .json(&json!({ "name": "Ravi", "email": EMAIL, "password": "pw" }))
        .await
        .assert_status_ok();
    server
}

async fn save_chart(server: &TestServer, name: &str, total: i64) -> i64 {
    let res = server
        .post("/api/diet-chart/save")
        .json(&json!({
            "user_email": EMAIL,
            "chart_name": name,
            "chart_data": { "meals": [], "totalCalories": total },
            "user_data": { "dietaryPreferences": "vegetarian" },
            "goal": "Maintenance",
            "target_calories": total,
        }))
        .await;
    res.assert_status_ok();
    res.json::<Value>()["chart_id"].as_i64().unwrap()
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            image::Rgb([200, 150, 50])
        } else {
            image::Rgb([240, 230, 210])
        }
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test]
async fn health_reports_success() {
    let res = server().await.get("/health").await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>(), json!({ "success": true }));
}

#[tokio::test]
async fn signup_login_and_failures() {
    let server = registered().await;

    let res = server
        .post("/api/login")
        .json(&json!({ "email": EMAIL, "password": "pw" }))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["userName"], json!("Ravi"));

    let res = server
        .post("/api/login")
        .json(&json!({ "email": EMAIL, "password": "nope" }))
        .await;
    res.assert_status(StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Incorrect password."));

    server
        .post("/api/signup")
        .json(&json!({ "name": "Other", "email": EMAIL, "password": "pw" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    let res = server.post("/api/signup").json(&json!({ "email": "x@y.z" })).await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["message"], json!("All fields required."));
}

#[tokio::test]
async fn unknown_email_is_not_authenticated() {
    let server = server().await;
    let res = server
        .get("/api/cart")
        .add_query_param("user_email", "ghost@example.com")
        .await;
    res.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>()["message"], json!("Not authenticated"));
}

#[tokio::test]
async fn cart_order_and_history() {
    let server = registered().await;
    server.post("/api/demo-products").await.assert_status_ok();

    let products = server.get("/api/products").await.json::<Value>();
    let items = products["products"].as_array().unwrap();
    assert_eq!(items.len(), 8);
    let whey = items[1]["id"].as_i64().unwrap();

    server
        .post("/api/cart")
        .json(&json!({ "user_email": EMAIL, "product_id": whey, "quantity": 2 }))
        .await
        .assert_status_ok();
    server
        .post("/api/cart")
        .json(&json!({ "user_email": EMAIL, "product_id": whey }))
        .await
        .assert_status_ok();

    let cart = server
        .get("/api/cart")
        .add_query_param("user_email", EMAIL)
        .await
        .json::<Value>();
    assert_eq!(cart["cart"][0]["quantity"], json!(3));
    assert_eq!(cart["cart"][0]["name"], json!("Whey Protein"));

    server
        .post("/api/cart")
        .json(&json!({ "user_email": EMAIL, "product_id": 9999 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let res = server.post("/api/order").json(&json!({ "user_email": EMAIL })).await;
    res.assert_status_ok();
    let order_id = res.json::<Value>()["order_id"].as_i64().unwrap();

    let history = server
        .get("/api/history")
        .add_query_param("user_email", EMAIL)
        .await
        .json::<Value>();
    assert_eq!(history["history"][0]["order_id"], json!(order_id));
    assert_eq!(history["history"][0]["price"], json!(2499.0));

    let cart = server
        .get("/api/cart")
        .add_query_param("user_email", EMAIL)
        .await
        .json::<Value>();
    assert!(cart["cart"].as_array().unwrap().is_empty());

    server
        .post("/api/order")
        .json(&json!({ "user_email": EMAIL }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn membership_purchase_and_history() {
    let server = registered().await;
    let res = server
        .post("/api/membership/buy")
        .json(&json!({ "user_email": EMAIL, "plan": "6months" }))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["membership"]["plan"], json!("6months"));

    server
        .post("/api/membership/buy")
        .json(&json!({ "user_email": EMAIL, "plan": "forever" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let history = server
        .get("/api/membership/history")
        .add_query_param("user_email", EMAIL)
        .await
        .json::<Value>();
    let entry = &history["history"][0];
    assert_eq!(entry["status"], json!("Not Expired"));
    assert!(entry["timeLeft"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn diet_chart_save_list_delete() {
    let server = registered().await;
    let first = save_chart(&server, "Cut", 1900).await;
    let second = save_chart(&server, "Bulk", 2600).await;

    let listed = server
        .get("/api/diet-chart/list")
        .add_query_param("user_email", EMAIL)
        .await
        .json::<Value>();
    let charts = listed["charts"].as_array().unwrap();
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0]["id"], json!(second));
    assert_eq!(charts[0]["chart_data"]["totalCalories"], json!(2600));

    let res = server
        .delete("/api/diet-chart/delete")
        .json(&json!({ "user_email": EMAIL, "chart_id": first }))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["message"], json!("Diet chart removed successfully"));

    server
        .delete("/api/diet-chart/delete")
        .json(&json!({ "user_email": EMAIL, "chart_id": first }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn merge_keeps_one_active_chart() {
    let server = registered().await;
    let a = save_chart(&server, "A", 1800).await;
    let b = save_chart(&server, "B", 2200).await;

    let res = server
        .post("/api/diet-chart/merge")
        .json(&json!({ "user_email": EMAIL, "selected_chart_ids": [a, b], "merge_goal": "Weight Loss" }))
        .await;
    res.assert_status_ok();
    let merged = &res.json::<Value>()["merged_chart"];
    assert_eq!(merged["target_calories"], json!(1800));
    assert_eq!(merged["chart_data"]["meals"][0]["calories"], json!(540));
    assert_eq!(merged["chart_data"]["meals"][0]["time"], json!("7:00 AM"));

    let listed = server
        .get("/api/diet-chart/list")
        .add_query_param("user_email", EMAIL)
        .await
        .json::<Value>();
    let charts = listed["charts"].as_array().unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0]["id"], merged["id"]);
}

#[tokio::test]
async fn merge_without_selection_creates_nothing() {
    let server = registered().await;
    save_chart(&server, "A", 2000).await;

    let res = server
        .post("/api/diet-chart/merge")
        .json(&json!({ "user_email": EMAIL, "selected_chart_ids": [], "merge_goal": "Maintenance" }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["success"], json!(false));

    let listed = server
        .get("/api/diet-chart/list")
        .add_query_param("user_email", EMAIL)
        .await
        .json::<Value>();
    let charts = listed["charts"].as_array().unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0]["chart_name"], json!("A"));
}

#[tokio::test]
async fn analyze_food_returns_report() {
    let server = server().await;
    let form = MultipartForm::new()
        .add_part(
            "image",
            Part::bytes(png_bytes())
                .file_name("plate.png")
                .mime_type("image/png"),
        )
        .add_text("filename", "biryani.png");
    let res = server.post("/api/analyze-food").multipart(form).await;
    res.assert_status_ok();

    let body = res.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert!(!body["food_name"].as_str().unwrap().is_empty());
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&confidence));
    for key in ["calories", "protein", "carbs", "fats", "fiber", "sugar"] {
        assert!(body["nutrition"][key].is_number(), "{key}");
    }
    assert!(body["health_tips"].is_array());
    assert!(body["reference_image"].is_string());
}

#[tokio::test]
async fn analyze_food_rejects_bad_uploads() {
    let server = server().await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"GIF89a".to_vec())
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );
    let res = server.post("/api/analyze-food").multipart(form).await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["message"], json!("Invalid image format"));

    let form = MultipartForm::new().add_text("filename", "dosa.jpg");
    let res = server.post("/api/analyze-food").multipart(form).await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["message"], json!("No image uploaded"));
}

#[tokio::test]
async fn corrupt_image_falls_back_to_popular_dish() {
    let server = server().await;
    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"\x89PNG garbage".to_vec())
            .file_name("mystery.png")
            .mime_type("image/png"),
    );
    let res = server.post("/api/analyze-food").multipart(form).await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["confidence"], json!(30.0));
}
