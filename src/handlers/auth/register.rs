use axum::extract::State;

use crate::api::JsonBody;
use crate::auth::create_token;
use crate::database::models::UserNew;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /auth/register - self sign-up. Registered users are never admins.
pub async fn register_post(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult<String> {
    let data = UserNew::from_register_json(&body)?;
    let user = state.users().register(&data).await?;

    let token = create_token(&user.username, user.is_admin, &state.config.security)?;
    tracing::info!("Registered user {}", user.username);
    Ok(ApiResponse::created("token", token))
}
