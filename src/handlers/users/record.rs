use axum::extract::{Path, State};

use crate::api::JsonBody;
use crate::database::models::{User, UserUpdate};
use crate::middleware::{AdminOrCorrectUser, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users/:username
pub async fn record_get(
    _caller: AdminOrCorrectUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<User> {
    let user = state.users().get(&username).await?;
    Ok(ApiResponse::ok("user", user))
}

/// PATCH /users/:username - a supplied password is re-hashed
pub async fn record_patch(
    _caller: AdminOrCorrectUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<User> {
    let data = UserUpdate::from_json(&body)?;
    let user = state.users().update(&username, &data).await?;
    Ok(ApiResponse::ok("user", user))
}

/// DELETE /users/:username
pub async fn record_delete(
    AdminOrCorrectUser(caller): AdminOrCorrectUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<String> {
    state.users().remove(&username).await?;
    tracing::info!("{} deleted user {}", caller.username, username);
    Ok(ApiResponse::ok("deleted", username))
}
