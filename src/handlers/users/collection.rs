use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::api::JsonBody;
use crate::auth::create_token;
use crate::database::models::{User, UserNew};
use crate::error::ApiError;
use crate::middleware::{Admin, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users - admin only
pub async fn collection_get(_admin: Admin, State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.users().find_all().await?;
    Ok(ApiResponse::ok("users", users))
}

/// POST /users - admin only; unlike registration the body may set `isAdmin`.
/// Responds with the new user and a token for them.
pub async fn collection_post(
    Admin(admin): Admin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    let data = UserNew::from_json(&body)?;
    let user = state.users().register(&data).await?;
    let token = create_token(&user.username, user.is_admin, &state.config.security)?;
    tracing::info!("{} created user {} (admin: {})", admin.username, user.username, user.is_admin);

    Ok((StatusCode::CREATED, Json(json!({ "user": user, "token": token }))))
}
