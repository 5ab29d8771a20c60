use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::{
    error::AppError,
    state::AppState,
    users::{
        dto::{to_responses, UserPayload, UserResponse},
        repo_types::User,
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/user_info/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// A non-integer id never names a user.
fn user_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "bad user id");
            Err(AppError::user_not_found())
        }
    }
}

fn user_payload(body: Result<Json<Value>, JsonRejection>) -> Result<UserPayload, AppError> {
    let Json(value) = body.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "unreadable body");
        AppError::MalformedInput(rejection.body_text())
    })?;
    UserPayload::from_json(value).map_err(|e| {
        warn!(reason = %e, "bad body shape");
        e
    })
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = User::list(&state.db).await?;
    Ok(Json(to_responses(users)))
}

/// POST / — answers with the full user list.
#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<UserResponse>>), AppError> {
    let candidate = user_payload(body)?.into_candidate()?;
    services::create_user(&state.db, candidate).await?;
    let users = User::list(&state.db).await?;
    Ok((StatusCode::CREATED, Json(to_responses(users))))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let id = user_id(path)?;
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(AppError::user_not_found)?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, body))]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let id = user_id(path)?;
    let candidate = user_payload(body)?.into_candidate()?;
    let user = services::update_user(&state.db, id, candidate).await?;
    Ok(Json(user.into()))
}

/// DELETE /user_info/:id — answers with the remaining users.
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let id = user_id(path)?;
    let remaining = services::delete_user(&state.db, id).await?;
    Ok(Json(to_responses(remaining)))
}
