use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,           // lowercased
    pub email: String,              // lowercased
    pub password: String,           // Argon2 PHC string, never plaintext
    pub created_at: OffsetDateTime, // UTC, set on insert
}
