use axum::extract::State;

use crate::api::{JsonBody, UserAuth};
use crate::auth::create_token;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /auth/token - `{username, password}` in, `{token}` out.
///
/// Wrong credentials are a 401 with "Invalid username/password".
pub async fn token_post(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult<String> {
    let credentials = UserAuth::from_json(&body)?;
    let user = state
        .users()
        .authenticate(&credentials.username, &credentials.password)
        .await?;

    let token = create_token(&user.username, user.is_admin, &state.config.security)?;
    tracing::debug!("Issued token for {}", user.username);
    Ok(ApiResponse::ok("token", token))
}
