use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use storage::models::ProductRow;
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::models::{CartLine, HistoryLine};

pub struct DemoProduct {
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub price: f64,
}

pub const DEMO_PRODUCTS: [DemoProduct; 8] = [
    DemoProduct {
        name: "Creatine Monohydrate",
        description: "Micronized creatine powder for muscle growth, strength, and performance. 100 servings.",
        image: "https://m.media-amazon.com/images/I/61auT4jdRQL._UF1000,1000_QL80_.jpg",
        price: 1399.0,
    },
    DemoProduct {
        name: "Whey Protein",
        description: "High-quality whey protein for muscle recovery and building. 1kg, chocolate flavor.",
        image: "https://m.media-amazon.com/images/I/71l2r6yqQ0L._AC_SL1500_.jpg",
        price: 2499.0,
    },
    DemoProduct {
        name: "BCAA Powder",
        description: "Branched-chain amino acids for muscle recovery and endurance. 30 servings.",
        image: "https://m.media-amazon.com/images/I/71QKQ9mwV7L._AC_SL1500_.jpg",
        price: 1199.0,
    },
    DemoProduct {
        name: "Electrol Hydration Drink",
        description: "Electrolyte drink for instant hydration and energy during workouts.",
        image: "https://m.media-amazon.com/images/I/61Q5p1QKQwL._AC_SL1000_.jpg",
        price: 299.0,
    },
    DemoProduct {
        name: "Gym Shaker Bottle",
        description: "Leak-proof shaker bottle for protein shakes and supplements. 700ml.",
        image: "https://m.media-amazon.com/images/I/61Q5p1QKQwL._AC_SL1000_.jpg",
        price: 349.0,
    },
    DemoProduct {
        name: "Gym Bag",
        description: "Spacious and durable gym bag with shoe compartment and water-resistant material.",
        image: "https://m.media-amazon.com/images/I/81Q5p1QKQwL._AC_SL1500_.jpg",
        price: 899.0,
    },
    DemoProduct {
        name: "Resistance Bands Set",
        description: "Set of 5 resistance bands for strength training, stretching, and mobility.",
        image: "https://m.media-amazon.com/images/I/71QKQ9mwV7L._AC_SL1500_.jpg",
        price: 499.0,
    },
    DemoProduct {
        name: "Yoga Mat",
        description: "Non-slip yoga mat for workouts, pilates, and stretching. 6mm thick.",
        image: "https://m.media-amazon.com/images/I/81Q5p1QKQwL._AC_SL1500_.jpg",
        price: 599.0,
    },
];

/// Catalog, carts and orders.
#[derive(Clone)]
pub struct Shop {
    pool: SqlitePool,
}

impl Shop {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_products(&self) -> ServiceResult<Vec<ProductRow>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, image, price FROM products ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts the demo catalog, skipping products that already exist.
    /// Returns how many rows were added.
    pub async fn seed_demo_products(&self) -> ServiceResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut added = 0;
        for p in &DEMO_PRODUCTS {
            added += sqlx::query(
                r#"
                INSERT OR IGNORE INTO products (name, description, image, price)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(p.name)
            .bind(p.description)
            .bind(p.image)
            .bind(p.price)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;
        info!(added, "demo products seeded");
        Ok(added)
    }

    /// Adds `quantity` of a product, incrementing an existing line.
    pub async fn add_to_cart(&self, email: &str, product_id: i64, quantity: i64) -> ServiceResult<()> {
        if quantity < 1 {
            return Err(ServiceError::invalid("Quantity must be at least 1"));
        }
        let exists = sqlx::query("SELECT 1 FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?
            .is_some();
        if !exists {
            return Err(ServiceError::not_found("Product not found"));
        }

        sqlx::query(
            r#"
            INSERT INTO cart_items (user_email, product_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_email, product_id) DO UPDATE SET
                quantity = quantity + excluded.quantity
            "#,
        )
        .bind(email)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;
        debug!(%email, product_id, quantity, "cart updated");
        Ok(())
    }

    pub async fn cart(&self, email: &str) -> ServiceResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT c.id, p.id AS product_id, p.name, p.price, p.image, c.quantity
            FROM cart_items c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_email = ?1
            ORDER BY c.id
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Removing a product that is not in the cart is a no-op.
    pub async fn remove_from_cart(&self, email: &str, product_id: i64) -> ServiceResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE user_email = ?1 AND product_id = ?2")
            .bind(email)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Moves the whole cart into a new order. Returns the order id.
    pub async fn place_order(&self, email: &str, now: DateTime<Utc>) -> ServiceResult<i64> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query("INSERT INTO orders (user_email, order_time) VALUES (?1, ?2)")
            .bind(email)
            .bind(now)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let copied = sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity)
            SELECT ?1, product_id, quantity FROM cart_items WHERE user_email = ?2 ORDER BY id
            "#,
        )
        .bind(order_id)
        .bind(email)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if copied == 0 {
            // Dropping the transaction rolls back the empty order.
            return Err(ServiceError::invalid("Cart is empty"));
        }

        sqlx::query("DELETE FROM cart_items WHERE user_email = ?1")
            .bind(email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        info!(%email, order_id, items = copied, "order placed");
        Ok(order_id)
    }

    /// Ordered products, newest order first.
    pub async fn order_history(&self, email: &str) -> ServiceResult<Vec<HistoryLine>> {
        let rows = sqlx::query_as::<_, HistoryLine>(
            r#"
            SELECT o.id AS order_id, o.order_time, p.id AS product_id, oi.quantity,
                   p.name, p.price, p.image
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            JOIN products p ON p.id = oi.product_id
            WHERE o.user_email = ?1
            ORDER BY o.order_time DESC, o.id DESC, oi.id
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
