mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use jobly_api::auth::{encode_claims, Claims};
use serde_json::json;
use tower::ServiceExt;

// Everything here is rejected before the store is touched, so no database is needed.

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let (status, body) = common::send(common::app_without_db()?, Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Jobly API");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let (status, body) = common::send(common::app_without_db()?, Method::GET, "/no-such-path", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_anonymous() -> Result<()> {
    let new_job = json!({ "title": "new", "companyHandle": "c1" });
    let cases = [
        (Method::POST, "/jobs", Some(new_job.clone())),
        (Method::PATCH, "/jobs/1", Some(json!({ "salary": 1 }))),
        (Method::DELETE, "/jobs/1", None),
        (Method::POST, "/companies", Some(json!({ "handle": "new" }))),
        (Method::DELETE, "/companies/c1", None),
        (Method::GET, "/users", None),
        (Method::GET, "/users/u1", None),
    ];

    for (method, uri, body) in cases {
        let (status, resp) = common::send(common::app_without_db()?, method.clone(), uri, None, body).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(resp["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_non_admin() -> Result<()> {
    let token = common::u1_token();
    let (status, _) = common::send(
        common::app_without_db()?,
        Method::POST,
        "/jobs",
        Some(&token),
        Some(json!({ "title": "new", "companyHandle": "c1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(common::app_without_db()?, Method::GET, "/users/u2", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn forged_and_expired_tokens_are_anonymous() -> Result<()> {
    let forged = encode_claims(&Claims::new("testAdmin", true, 1), "not-the-secret")?;
    let mut expired_claims = Claims::new("testAdmin", true, 1);
    expired_claims.iat -= 7200;
    expired_claims.exp -= 7200;
    let expired = encode_claims(&expired_claims, &jobly_api::config::AppConfig::test().security.jwt_secret)?;

    for token in [forged, expired, "garbage".to_string()] {
        let (status, _) = common::send(common::app_without_db()?, Method::DELETE, "/jobs/1", Some(&token), None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

#[tokio::test]
async fn validation_errors_list_every_problem() -> Result<()> {
    let token = common::admin_token();
    let (status, body) = common::send(
        common::app_without_db()?,
        Method::POST,
        "/jobs",
        Some(&token),
        Some(json!({ "salary": "not-a-number", "equity": "2" })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 4);
    Ok(())
}

#[tokio::test]
async fn patch_cannot_move_a_job() -> Result<()> {
    let token = common::admin_token();
    let (status, body) = common::send(
        common::app_without_db()?,
        Method::PATCH,
        "/jobs/1",
        Some(&token),
        Some(json!({ "companyHandle": "c2" })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"][0],
        "instance is not allowed to have the additional property \"companyHandle\""
    );
    Ok(())
}

#[tokio::test]
async fn non_numeric_job_id_is_bad_request() -> Result<()> {
    let (status, body) = common::send(common::app_without_db()?, Method::GET, "/jobs/abc", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid job id: abc");
    Ok(())
}

#[tokio::test]
async fn out_of_range_job_id_is_not_found() -> Result<()> {
    let app = common::app_without_db()?;
    let token = common::admin_token();

    let (status, body) = common::send(app.clone(), Method::DELETE, "/jobs/99999999999", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No job: 99999999999");

    let (status, _) = common::send(app, Method::GET, "/jobs/99999999999", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn filters_are_validated_before_querying() -> Result<()> {
    let app = common::app_without_db()?;
    let (status, _) = common::send(app.clone(), Method::GET, "/jobs?location=CA", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::send(app.clone(), Method::GET, "/jobs?minSalary=lots", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        common::send(app, Method::GET, "/companies?minEmployees=5&maxEmployees=1", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_reported() -> Result<()> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))?;

    let response = common::app_without_db()?.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn token_request_requires_both_fields() -> Result<()> {
    let (status, body) = common::send(
        common::app_without_db()?,
        Method::POST,
        "/auth/token",
        None,
        Some(json!({ "username": "u1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "instance requires property \"password\"");
    Ok(())
}
