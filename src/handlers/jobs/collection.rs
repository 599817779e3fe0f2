use axum::extract::State;

use crate::api::{JsonBody, QueryParams};
use crate::database::models::{Job, JobFilter, JobNew};
use crate::middleware::{Admin, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /jobs - all jobs, optionally narrowed by `title`, `minSalary`, `maxSalary`, `companyHandle`
pub async fn collection_get(State(state): State<AppState>, QueryParams(params): QueryParams) -> ApiResult<Vec<Job>> {
    let filter = JobFilter::from_query(&params)?;
    let jobs = state.jobs().find_all(&filter).await?;
    Ok(ApiResponse::ok("jobs", jobs))
}

/// POST /jobs - admin only
pub async fn collection_post(
    Admin(admin): Admin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<Job> {
    let data = JobNew::from_json(&body)?;
    let job = state.jobs().create(&data).await?;
    tracing::info!("{} created job {} ({})", admin.username, job.id, job.title);
    Ok(ApiResponse::created("job", job))
}
