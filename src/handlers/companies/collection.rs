use axum::extract::State;

use crate::api::{JsonBody, QueryParams};
use crate::database::models::{Company, CompanyFilter, CompanyNew};
use crate::middleware::{Admin, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /companies - optional `name`, `minEmployees`, `maxEmployees`
pub async fn collection_get(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> ApiResult<Vec<Company>> {
    let filter = CompanyFilter::from_query(&params)?;
    let companies = state.companies().find_all(&filter).await?;
    Ok(ApiResponse::ok("companies", companies))
}

/// POST /companies - admin only
pub async fn collection_post(
    Admin(admin): Admin,
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<Company> {
    let data = CompanyNew::from_json(&body)?;
    let company = state.companies().create(&data).await?;
    tracing::info!("{} created company {}", admin.username, company.handle);
    Ok(ApiResponse::created("company", company))
}
