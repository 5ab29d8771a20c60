use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::users::repo_types::User;
use crate::users::validation::{Conflicts, EMAIL_TAKEN, USERNAME_TAKEN};

/// Unique-constraint failures become `Conflict`, named after the column that
/// tripped. Everything else is internal.
fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let message = if db_err.message().contains("users.email") {
                EMAIL_TAKEN
            } else {
                USERNAME_TAKEN
            };
            return AppError::Conflict(message.into());
        }
    }
    e.into()
}

impl User {
    /// All users in storage order.
    pub async fn list(db: &SqlitePool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Whether `username` / `email` belong to some record other than
    /// `exclude_id`.
    pub async fn find_conflicts(
        db: &SqlitePool,
        username: &str,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<Conflicts, AppError> {
        let (username_taken, email_taken): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM users WHERE username = ? AND id IS NOT ?),
                EXISTS(SELECT 1 FROM users WHERE email = ? AND id IS NOT ?)
            "#,
        )
        .bind(username)
        .bind(exclude_id)
        .bind(email)
        .bind(exclude_id)
        .fetch_one(db)
        .await?;
        Ok(Conflicts {
            username: username_taken != 0,
            email: email_taken != 0,
        })
    }

    pub async fn insert(
        db: &SqlitePool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, email, password, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await
        .map_err(map_write_error)
    }

    /// Overwrites username, email and password. `None` if `id` is unknown.
    pub async fn update(
        db: &SqlitePool,
        id: i64,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET username = ?, email = ?, password = ?
             WHERE id = ?
            RETURNING id, username, email, password, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(map_write_error)
    }

    /// Returns false if there was nothing to delete.
    pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
