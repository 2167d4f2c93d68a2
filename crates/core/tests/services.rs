use chrono::{Duration, TimeZone, Utc};
use sqlx::SqlitePool;
use workoutvibes_core::accounts::Accounts;
use workoutvibes_core::membership::{Memberships, Plan};
use workoutvibes_core::models::MembershipStatus;
use workoutvibes_core::shop::{Shop, DEMO_PRODUCTS};
use workoutvibes_core::ServiceError;

async fn pool() -> SqlitePool {
    storage::open("sqlite::memory:").await.unwrap()
}

#[tokio::test]
async fn signup_then_login() {
    let accounts = Accounts::new(pool().await, 1_000);
    accounts.signup("Asha", "asha@example.com", "s3cret").await.unwrap();

    assert_eq!(accounts.login("asha@example.com", "s3cret").await.unwrap(), "Asha");

    let stored = accounts.find("asha@example.com").await.unwrap().unwrap();
    assert!(stored.password.starts_with("pbkdf2:sha256:1000$"));
    assert_ne!(stored.password, "s3cret");
}

#[tokio::test]
async fn signup_rejects_blank_fields_and_duplicates() {
    let accounts = Accounts::new(pool().await, 1_000);
    assert!(matches!(
        accounts.signup("  ", "a@b.c", "pw").await,
        Err(ServiceError::InvalidInput(_))
    ));
    accounts.signup("A", "a@b.c", "pw").await.unwrap();
    match accounts.signup("B", "a@b.c", "other").await {
        Err(ServiceError::Conflict(msg)) => assert_eq!(msg, "Email already registered."),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn login_distinguishes_unknown_user_and_bad_password() {
    let accounts = Accounts::new(pool().await, 1_000);
    accounts.signup("A", "a@b.c", "pw").await.unwrap();

    match accounts.login("nobody@b.c", "pw").await {
        Err(ServiceError::Unauthorized(msg)) => assert_eq!(msg, "User not found."),
        other => panic!("unexpected {other:?}"),
    }
    match accounts.login("a@b.c", "wrong").await {
        Err(ServiceError::Unauthorized(msg)) => assert_eq!(msg, "Incorrect password."),
        other => panic!("unexpected {other:?}"),
    }
    assert!(accounts.require_user("a@b.c").await.is_ok());
    assert!(accounts.require_user("").await.is_err());
    assert!(accounts.require_user("ghost@b.c").await.is_err());
}

#[tokio::test]
async fn demo_seeding_is_idempotent() {
    let shop = Shop::new(pool().await);
    assert_eq!(shop.seed_demo_products().await.unwrap(), 8);
    assert_eq!(shop.seed_demo_products().await.unwrap(), 0);

    let products = shop.list_products().await.unwrap();
    assert_eq!(products.len(), DEMO_PRODUCTS.len());
    assert_eq!(products[0].name, "Creatine Monohydrate");
    assert_eq!(products[0].price, 1399.0);
}

#[tokio::test]
async fn cart_increments_and_orders_clear_it() {
    let shop = Shop::new(pool().await);
    shop.seed_demo_products().await.unwrap();
    let products = shop.list_products().await.unwrap();
    let (whey, mat) = (products[1].id, products[7].id);
    let email = "buyer@example.com";

    shop.add_to_cart(email, whey, 1).await.unwrap();
    shop.add_to_cart(email, whey, 2).await.unwrap();
    shop.add_to_cart(email, mat, 1).await.unwrap();
    let cart = shop.cart(email).await.unwrap();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart[0].name, "Whey Protein");
    assert_eq!(cart[0].quantity, 3);

    shop.remove_from_cart(email, mat).await.unwrap();
    assert_eq!(shop.cart(email).await.unwrap().len(), 1);

    let first = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
    let order_id = shop.place_order(email, first).await.unwrap();
    assert!(shop.cart(email).await.unwrap().is_empty());

    shop.add_to_cart(email, mat, 1).await.unwrap();
    let second = shop.place_order(email, first + Duration::hours(1)).await.unwrap();

    let history = shop.order_history(email).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].order_id, second);
    assert_eq!(history[0].name, "Yoga Mat");
    assert_eq!(history[1].order_id, order_id);
    assert_eq!(history[1].quantity, 3);
}

#[tokio::test]
async fn cart_rejects_bad_quantity_unknown_product_and_empty_orders() {
    let shop = Shop::new(pool().await);
    shop.seed_demo_products().await.unwrap();
    let id = shop.list_products().await.unwrap()[0].id;

    assert!(matches!(
        shop.add_to_cart("x@y.z", id, 0).await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(matches!(
        shop.add_to_cart("x@y.z", 9_999, 1).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        shop.place_order("x@y.z", Utc::now()).await,
        Err(ServiceError::InvalidInput(_))
    ));
    assert!(shop.order_history("x@y.z").await.unwrap().is_empty());
}

#[tokio::test]
async fn membership_history_reports_expiry() {
    let memberships = Memberships::new(pool().await);
    let email = "member@example.com";
    let jan = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let bought = memberships.buy(email, Plan::OneMonth, jan).await.unwrap();
    assert_eq!(bought.end, jan + Duration::days(30));
    memberships
        .buy(email, Plan::SixMonths, jan + Duration::days(10))
        .await
        .unwrap();

    let now = jan + Duration::days(40);
    let history = memberships.history(email, now).await.unwrap();
    assert_eq!(history.len(), 2);

    assert_eq!(history[0].plan, "6months");
    assert_eq!(history[0].status, MembershipStatus::NotExpired);
    assert_eq!(history[0].time_left, Duration::days(150).num_milliseconds());

    assert_eq!(history[1].plan, "1month");
    assert_eq!(history[1].status, MembershipStatus::Expired);
    assert_eq!(history[1].time_left, 0);
}

#[test]
fn plans_parse_and_map_to_days() {
    assert_eq!("1year".parse::<Plan>().unwrap().duration(), Duration::days(360));
    assert_eq!("6months".parse::<Plan>().unwrap().duration(), Duration::days(180));
    assert!("lifetime".parse::<Plan>().is_err());
}
