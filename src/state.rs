use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::PasswordHasher;
use crate::config::AppConfig;
use crate::database::{CompanyRepository, JobRepository, UserRepository};

/// Shared handler state. The pool is handed in by whoever builds the router.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self { pool, config: Arc::new(config) }
    }

    pub fn jobs(&self) -> JobRepository {
        JobRepository::new(self.pool.clone()).log_queries(self.config.database.enable_query_logging)
    }

    pub fn companies(&self) -> CompanyRepository {
        CompanyRepository::new(self.pool.clone()).log_queries(self.config.database.enable_query_logging)
    }

    pub fn users(&self) -> UserRepository {
        let hasher = PasswordHasher::new(self.config.security.fast_password_hashing);
        UserRepository::new(self.pool.clone(), hasher).log_queries(self.config.database.enable_query_logging)
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
