use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::AppError;
use crate::users::dto::UserCandidate;
use crate::users::password::hash_password;
use crate::users::repo_types::User;
use crate::users::validation::validate;

/// Validates and stores a new user. The unique constraints on the table back
/// up the pre-check when two writers race.
pub async fn create_user(db: &SqlitePool, candidate: UserCandidate) -> Result<User, AppError> {
    let conflicts =
        User::find_conflicts(db, &candidate.username, &candidate.email, None).await?;
    if let Err(e) = validate(&candidate, conflicts) {
        warn!(username = %candidate.username, reason = %e, "create rejected");
        return Err(e);
    }

    let hash = hash_password(&candidate.password)?;
    let user = User::insert(db, &candidate.username, &candidate.email, &hash).await?;
    info!(user_id = user.id, username = %user.username, "user created");
    Ok(user)
}

/// Replaces username, email and password of an existing user. The record
/// being updated does not conflict with itself.
pub async fn update_user(
    db: &SqlitePool,
    id: i64,
    candidate: UserCandidate,
) -> Result<User, AppError> {
    if User::find_by_id(db, id).await?.is_none() {
        return Err(AppError::user_not_found());
    }

    let conflicts =
        User::find_conflicts(db, &candidate.username, &candidate.email, Some(id)).await?;
    if let Err(e) = validate(&candidate, conflicts) {
        warn!(user_id = id, reason = %e, "update rejected");
        return Err(e);
    }

    let hash = hash_password(&candidate.password)?;
    let user = User::update(db, id, &candidate.username, &candidate.email, &hash)
        .await?
        // deleted between the lookup and the write
        .ok_or_else(AppError::user_not_found)?;
    info!(user_id = user.id, username = %user.username, "user updated");
    Ok(user)
}

/// Removes a user and returns whoever is left.
pub async fn delete_user(db: &SqlitePool, id: i64) -> Result<Vec<User>, AppError> {
    if !User::delete(db, id).await? {
        return Err(AppError::user_not_found());
    }
    info!(user_id = id, "user deleted");
    User::list(db).await
}
