use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_token, Claims};
use crate::config::AppConfig;
use crate::error::ApiError;

/// Identity carried by a verified token.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// Attaches an `AuthUser` when the request carries a valid bearer token.
///
/// Never rejects: a missing or bad token just leaves the request anonymous,
/// and the route gates decide what that means.
pub async fn authenticate_jwt(
    State(config): State<Arc<AppConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(request.headers()) {
        match verify_token(&token, &config.security.jwt_secret) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthUser::from(claims));
            }
            Err(e) => tracing::debug!("Ignoring bearer token: {}", e),
        }
    }

    next.run(request).await
}

/// Token from `Authorization: Bearer <token>`; the scheme is matched case-insensitively.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn unauthorized() -> ApiError {
    ApiError::unauthorized("Unauthorized")
}

pub fn ensure_logged_in(user: Option<&AuthUser>) -> Result<&AuthUser, ApiError> {
    user.ok_or_else(unauthorized)
}

pub fn ensure_admin(user: Option<&AuthUser>) -> Result<&AuthUser, ApiError> {
    match user {
        Some(user) if user.is_admin => Ok(user),
        _ => Err(unauthorized()),
    }
}

pub fn ensure_correct_user<'a>(user: Option<&'a AuthUser>, username: &str) -> Result<&'a AuthUser, ApiError> {
    match user {
        Some(user) if user.username == username => Ok(user),
        _ => Err(unauthorized()),
    }
}

pub fn ensure_admin_or_correct_user<'a>(
    user: Option<&'a AuthUser>,
    username: &str,
) -> Result<&'a AuthUser, ApiError> {
    match user {
        Some(user) if user.is_admin || user.username == username => Ok(user),
        _ => Err(unauthorized()),
    }
}

async fn path_username<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<String, ApiError> {
    let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|_| unauthorized())?;
    params.get("username").cloned().ok_or_else(unauthorized)
}

/// Any authenticated caller.
#[derive(Clone, Debug)]
pub struct LoggedIn(pub AuthUser);

/// Caller whose token has `isAdmin`.
#[derive(Clone, Debug)]
pub struct Admin(pub AuthUser);

/// Caller whose username matches the `:username` path segment.
#[derive(Clone, Debug)]
pub struct CorrectUser(pub AuthUser);

#[derive(Clone, Debug)]
pub struct AdminOrCorrectUser(pub AuthUser);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for LoggedIn {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        ensure_logged_in(parts.extensions.get::<AuthUser>()).map(|u| LoggedIn(u.clone()))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        ensure_admin(parts.extensions.get::<AuthUser>()).map(|u| Admin(u.clone()))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CorrectUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let username = path_username(parts, state).await?;
        ensure_correct_user(parts.extensions.get::<AuthUser>(), &username).map(|u| CorrectUser(u.clone()))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminOrCorrectUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let username = path_username(parts, state).await?;
        ensure_admin_or_correct_user(parts.extensions.get::<AuthUser>(), &username)
            .map(|u| AdminOrCorrectUser(u.clone()))
    }
}
