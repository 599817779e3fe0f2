pub mod company;
pub mod job;
pub mod user;

pub use company::CompanyRepository;
pub use job::JobRepository;
pub use user::UserRepository;

use crate::database::manager::DatabaseError;

pub(crate) fn log_query(enabled: bool, sql: &str) {
    if enabled {
        tracing::debug!(target: "jobly_api::sql", "{}", sql);
    }
}

/// Maps a violated unique/foreign-key constraint to the matching accessor error.
pub(crate) fn constraint_error(
    err: sqlx::Error,
    on_unique: impl FnOnce() -> String,
    on_foreign_key: impl FnOnce() -> String,
) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DatabaseError::Conflict(on_unique()),
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            DatabaseError::InvalidReference(on_foreign_key())
        }
        _ => DatabaseError::Sqlx(err),
    }
}
