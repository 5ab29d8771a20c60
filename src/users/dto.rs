use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::users::repo_types::User;

/// Request body for POST / and PATCH /user_info/:id.
///
/// Fields are optional here so a missing one can be reported by name instead
/// of as a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Normalized input for a write. Password is still plaintext.
#[derive(Debug, Clone)]
pub struct UserCandidate {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::MalformedInput(format!("{field} column can not be empty")))
}

impl UserPayload {
    /// Reads the fields out of a JSON object. Arrays and scalars are rejected
    /// even when they would line up positionally with the fields.
    pub fn from_json(body: Value) -> Result<Self, AppError> {
        match body {
            Value::Object(fields) => serde_json::from_value(Value::Object(fields))
                .map_err(|e| AppError::MalformedInput(e.to_string())),
            _ => Err(AppError::MalformedInput("request body must be a JSON object".into())),
        }
    }

    pub fn into_candidate(self) -> Result<UserCandidate, AppError> {
        let username = required(self.username, "username")?;
        let email = required(self.email, "email")?;
        let password = required(self.password, "password")?;
        Ok(UserCandidate {
            username: username.to_lowercase(),
            email: email.to_lowercase(),
            password,
        })
    }
}

/// Outgoing shape of a user record. The password field carries the stored
/// hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(with = "time::serde::rfc2822")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            password: u.password,
            created_at: u.created_at,
        }
    }
}

pub fn to_responses(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}
