use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("parse database url {}", config.database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("connect to database")
}

/// Creates the table set if it is not there yet.
pub async fn create_schema(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            username   VARCHAR(25) NOT NULL UNIQUE,
            email      VARCHAR(25) NOT NULL UNIQUE,
            password   VARCHAR(25) NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await
    .context("create users table")?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists,
}

/// One-shot initializer: creates the database file and its tables unless the
/// file is already there. Without a file path the schema is ensured in place.
pub async fn initialize(config: &AppConfig) -> anyhow::Result<InitOutcome> {
    if let Some(path) = config.database_file() {
        if path.exists() {
            return Ok(InitOutcome::AlreadyExists);
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create database directory {}", parent.display()))?;
        }
    }

    let db = connect(config).await?;
    create_schema(&db).await?;
    db.close().await;
    Ok(InitOutcome::Created)
}

/// Single-connection in-memory pool. One connection only: every sqlite
/// in-memory connection is its own database.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    create_schema(&db).await.expect("schema");
    db
}
