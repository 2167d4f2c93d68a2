//! Storage layer: SQLite schema and helpers.
//!
//! Holds DB pool setup, the migration runner and the row types the
//! repositories in `workoutvibes-core` read back.

pub mod models;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

/// Turns a bare filesystem path into a `sqlite://` URL; URLs pass through.
pub fn database_url(database: &str) -> String {
    if database.starts_with("sqlite:") {
        return database.to_string();
    }
    let path = std::path::PathBuf::from(database);
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let norm = path.to_string_lossy().replace('\\', "/");
    if path.is_absolute() {
        format!("sqlite:///{}", norm.trim_start_matches('/'))
    } else {
        format!("sqlite://{}", norm)
    }
}

pub async fn connect(database: &str) -> anyhow::Result<SqlitePool> {
    let url = database_url(database);
    let opts = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    let mut pool_opts = SqlitePoolOptions::new();
    if url.contains("memory") {
        // A private in-memory database lives only as long as its connection.
        pool_opts = pool_opts
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        pool_opts = pool_opts.max_connections(5);
    }
    debug!(%url, "opening sqlite pool");
    let pool = pool_opts.connect_with(opts).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    // Applies SQLx migrations located in crates/storage/migrations.
    // Safe to run multiple times (idempotent).
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Connects and migrates in one step.
pub async fn open(database: &str) -> anyhow::Result<SqlitePool> {
    let pool = connect(database).await?;
    migrate(&pool).await?;
    Ok(pool)
}
