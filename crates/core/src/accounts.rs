use chrono::Utc;
use sqlx::SqlitePool;
use storage::models::UserRow;
use tracing::{info, warn};

use crate::auth;
use crate::error::{ServiceError, ServiceResult};

pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Registered users keyed by email.
#[derive(Clone)]
pub struct Accounts {
    pool: SqlitePool,
    rounds: u32,
}

impl Accounts {
    pub fn new(pool: SqlitePool, rounds: u32) -> Self {
        Self { pool, rounds }
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> ServiceResult<i64> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ServiceError::invalid("All fields required."));
        }
        if self.find(email).await?.is_some() {
            return Err(ServiceError::Conflict("Email already registered.".into()));
        }

        let rounds = self.rounds;
        let secret = password.to_string();
        let hashed = tokio::task::spawn_blocking(move || auth::hash_password(&secret, rounds)).await?;

        let res = sqlx::query(
            r#"
            INSERT INTO users (name, email, password, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(hashed)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(ServiceError::from);

        match res {
            Ok(done) => {
                info!(%email, "user registered");
                Ok(done.last_insert_rowid())
            }
            // Lost a race with a concurrent signup for the same address.
            Err(err) if err.is_unique_violation() => {
                Err(ServiceError::Conflict("Email already registered.".into()))
            }
            Err(err) => Err(err),
        }
    }

    /// Returns the user's display name.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<String> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::invalid("All fields required."));
        }
        let Some(user) = self.find(email).await? else {
            warn!(%email, "login for unknown user");
            return Err(ServiceError::unauthorized("User not found."));
        };

        let stored = user.password.clone();
        let attempt = password.to_string();
        let ok = tokio::task::spawn_blocking(move || auth::verify_password(&stored, &attempt)).await?;
        if !ok {
            warn!(%email, "login with wrong password");
            return Err(ServiceError::unauthorized("Incorrect password."));
        }
        Ok(user.name)
    }

    /// Fails with `Unauthorized` unless `email` belongs to a registered user.
    pub async fn require_user(&self, email: &str) -> ServiceResult<()> {
        let email = email.trim();
        if email.is_empty() || self.find(email).await?.is_none() {
            return Err(ServiceError::unauthorized(NOT_AUTHENTICATED));
        }
        Ok(())
    }

    pub async fn find(&self, email: &str) -> ServiceResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password, created_at FROM users WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
