pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod sql;
pub mod state;

use axum::{
    extract::{DefaultBodyLimit, State},
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::authenticate_jwt;

pub use crate::state::AppState;

/// Full router with the token middleware, tracing, body limit and (optionally) CORS.
pub fn app(state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(from_fn_with_state(state.clone(), authenticate_jwt));

    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(company_routes())
        .merge(job_routes())
        .merge(user_routes())
        .fallback(not_found)
        .layer(layers);

    let router = if state.config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/auth/token", post(auth::token_post))
        .route("/auth/register", post(auth::register_post))
}

fn company_routes() -> Router<AppState> {
    use handlers::companies;

    Router::new()
        .route(
            "/companies",
            get(companies::collection_get).post(companies::collection_post),
        )
        .route(
            "/companies/:handle",
            get(companies::record_get)
                .patch(companies::record_patch)
                .delete(companies::record_delete),
        )
}

fn job_routes() -> Router<AppState> {
    use handlers::jobs;

    Router::new()
        .route("/jobs", get(jobs::collection_get).post(jobs::collection_post))
        .route(
            "/jobs/:id",
            get(jobs::record_get).patch(jobs::record_patch).delete(jobs::record_delete),
        )
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/users", get(users::collection_get).post(users::collection_post))
        .route(
            "/users/:username",
            get(users::record_get)
                .patch(users::record_patch)
                .delete(users::record_delete),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Jobly API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/auth/token, /auth/register (public)",
            "companies": "/companies[/:handle] (reads public, writes admin)",
            "jobs": "/jobs[/:id] (reads public, writes admin)",
            "users": "/users[/:username] (admin or same user)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match DatabaseManager::health_check(&state.pool).await {
        Ok(()) => Ok(Json(json!({
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "database": "ok"
        }))),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("Database unavailable"))
        }
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
