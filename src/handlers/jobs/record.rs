use axum::extract::{Path, State};

use crate::api::JsonBody;
use crate::database::models::{Job, JobUpdate};
use crate::error::ApiError;
use crate::middleware::{Admin, ApiResponse, ApiResult};
use crate::state::AppState;

/// Job ids are integers; anything else never reaches the store. A number
/// outside the `SERIAL` range names a job that cannot exist.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    let numeric = raw.strip_prefix('-').unwrap_or(raw);
    if numeric.is_empty() || !numeric.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::bad_request(format!("Invalid job id: {}", raw)));
    }

    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found(format!("No job: {}", raw)))
}

/// GET /jobs/:id
pub async fn record_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Job> {
    let id = parse_id(&id)?;
    let job = state.jobs().get(id).await?;
    Ok(ApiResponse::ok("job", job))
}

/// PATCH /jobs/:id - admin only; `companyHandle` cannot change
pub async fn record_patch(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Job> {
    let id = parse_id(&id)?;
    let data = JobUpdate::from_json(&body)?;
    let job = state.jobs().update(id, &data).await?;
    Ok(ApiResponse::ok("job", job))
}

/// DELETE /jobs/:id - admin only
pub async fn record_delete(
    Admin(admin): Admin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<i32> {
    let id = parse_id(&id)?;
    state.jobs().remove(id).await?;
    tracing::info!("{} deleted job {}", admin.username, id);
    Ok(ApiResponse::ok("deleted", id))
}
