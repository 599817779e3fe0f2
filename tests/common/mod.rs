#![allow(dead_code, unused_macros)]

/// Seeded `TestDb`, or an early `Ok(())` when no test database is configured.
macro_rules! db_or_skip {
    () => {
        match common::TestDb::setup().await? {
            Some(db) => db,
            None => return Ok(()),
        }
    };
}

use std::str::FromStr;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use jobly_api::auth::create_token;
use jobly_api::config::AppConfig;
use jobly_api::database::models::{CompanyNew, JobNew, UserNew};
use jobly_api::database::DatabaseManager;
use jobly_api::{app, AppState};

/// Test log output, filtered by `RUST_LOG` (default `jobly_api=warn`). Safe to call repeatedly.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobly_api=warn,tests=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Router over a pool that never connects. Good for paths that fail before touching the store.
pub fn app_without_db() -> Result<Router> {
    init_tracing();
    let config = AppConfig::test();
    let pool = DatabaseManager::connect_lazy(&config.database)?;
    Ok(app(AppState::new(pool, config)))
}

pub fn u1_token() -> String {
    create_token("u1", false, &AppConfig::test().security).expect("token")
}

pub fn admin_token() -> String {
    create_token("testAdmin", true, &AppConfig::test().security).expect("token")
}

/// A migrated and seeded Postgres schema private to one test.
pub struct TestDb {
    pub state: AppState,
    pub job_ids: Vec<i32>,
    schema: String,
    base_url: String,
}

impl TestDb {
    /// `None` when `TEST_DATABASE_URL` is unset, so database tests skip instead of failing.
    pub async fn setup() -> Result<Option<Self>> {
        init_tracing();
        let Ok(base_url) = std::env::var("TEST_DATABASE_URL") else {
            tracing::warn!(target: "tests", "TEST_DATABASE_URL not set, skipping database test");
            return Ok(None);
        };

        let schema = format!("test_{}", uuid::Uuid::new_v4().simple());
        let admin = PgPool::connect(&base_url).await.context("connect TEST_DATABASE_URL")?;
        admin.execute(format!("CREATE SCHEMA \"{}\"", schema).as_str()).await?;
        admin.close().await;

        let search_path = schema.clone();
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    let sql = format!("SET search_path TO \"{}\"", search_path);
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&base_url)
            .await?;
        DatabaseManager::migrate(&pool).await?;

        let mut config = AppConfig::test();
        config.database.url = base_url.clone();
        let state = AppState::new(pool, config);

        let mut db = Self { state, job_ids: Vec::new(), schema, base_url };
        db.seed().await?;
        Ok(Some(db))
    }

    async fn seed(&mut self) -> Result<()> {
        let companies = self.state.companies();
        for n in 1..=3 {
            companies
                .create(&CompanyNew {
                    handle: format!("c{n}"),
                    name: format!("C{n}"),
                    description: format!("Desc{n}"),
                    num_employees: Some(n),
                    logo_url: Some(format!("http://c{n}.img")),
                })
                .await?;
        }

        let users = self.state.users();
        for n in 1..=3 {
            users
                .register(&UserNew {
                    username: format!("u{n}"),
                    password: format!("password{n}"),
                    first_name: format!("U{n}F"),
                    last_name: format!("U{n}L"),
                    email: format!("user{n}@user.com"),
                    is_admin: false,
                })
                .await?;
        }

        let jobs = self.state.jobs();
        for (n, salary) in [(1, 100000), (2, 150000), (3, 200000)] {
            let job = jobs
                .create(&JobNew {
                    title: format!("j{n}"),
                    salary: Some(salary),
                    equity: Some(Decimal::from_str("0.5")?),
                    company_handle: format!("c{n}"),
                })
                .await?;
            self.job_ids.push(job.id);
        }
        Ok(())
    }

    pub fn app(&self) -> Router {
        app(self.state.clone())
    }

    pub fn pool(&self) -> &PgPool {
        &self.state.pool
    }

    pub async fn teardown(self) -> Result<()> {
        self.state.pool.close().await;
        let admin = PgPool::connect(&self.base_url).await?;
        admin
            .execute(format!("DROP SCHEMA \"{}\" CASCADE", self.schema).as_str())
            .await?;
        admin.close().await;
        Ok(())
    }
}

/// Sends one request through the router and returns the status and JSON body (`Null` when empty).
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}
