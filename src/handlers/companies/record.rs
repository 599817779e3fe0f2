use axum::extract::{Path, State};

use crate::api::JsonBody;
use crate::database::models::{Company, CompanyDetail, CompanyUpdate};
use crate::middleware::{Admin, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /companies/:handle - includes the company's jobs
pub async fn record_get(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<CompanyDetail> {
    let company = state.companies().get(&handle).await?;
    Ok(ApiResponse::ok("company", company))
}

/// PATCH /companies/:handle - admin only
pub async fn record_patch(
    _admin: Admin,
    State(state): State<AppState>,
    Path(handle): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Company> {
    let data = CompanyUpdate::from_json(&body)?;
    let company = state.companies().update(&handle, &data).await?;
    Ok(ApiResponse::ok("company", company))
}

/// DELETE /companies/:handle - admin only; the company's jobs go with it
pub async fn record_delete(
    Admin(admin): Admin,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> ApiResult<String> {
    state.companies().remove(&handle).await?;
    tracing::info!("{} deleted company {}", admin.username, handle);
    Ok(ApiResponse::ok("deleted", handle))
}
