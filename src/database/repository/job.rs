use sqlx::PgPool;
use tracing::info;

use super::{constraint_error, log_query};
use crate::database::manager::DatabaseError;
use crate::database::models::job::{JOB_COLUMNS, JOB_FILTER_COLUMNS, JOB_FILTER_RULES};
use crate::database::models::{Job, JobFilter, JobNew, JobUpdate};
use crate::sql::bind::bind_all_as;
use crate::sql::{sql_for_filtering, sql_for_partial_update};

const JOB_RETURNING: &str = "id, title, salary, equity, company_handle";

/// Data access for `jobs`, keyed by the surrogate `id`.
pub struct JobRepository {
    pool: PgPool,
    log_queries: bool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, log_queries: false }
    }

    pub fn log_queries(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Inserts a job. Fails with `Conflict` when a job with the same title exists
    /// and with `InvalidReference` when the company does not.
    pub async fn create(&self, data: &JobNew) -> Result<Job, DatabaseError> {
        let duplicate = sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE title = $1 LIMIT 1")
            .bind(&data.title)
            .fetch_optional(&self.pool)
            .await?;

        if duplicate.is_some() {
            return Err(DatabaseError::Conflict(format!("Duplicate job: {}", data.title)));
        }

        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {}",
            JOB_RETURNING
        );
        log_query(self.log_queries, &sql);

        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(&data.title)
            .bind(data.salary)
            .bind(data.equity)
            .bind(&data.company_handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                constraint_error(
                    e,
                    || format!("Duplicate job: {}", data.title),
                    || format!("No company: {}", data.company_handle),
                )
            })?;

        info!("Created job {} ({})", job.id, job.title);
        Ok(job)
    }

    /// All jobs ordered by title, narrowed by whichever filters are set.
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<Job>, DatabaseError> {
        let criteria = filter.to_criteria();
        let mut sql = format!("SELECT {} FROM jobs", JOB_RETURNING);

        let params = if criteria.is_empty() {
            Vec::new()
        } else {
            let fragment = sql_for_filtering(&criteria, &JOB_FILTER_RULES, &JOB_FILTER_COLUMNS)?;
            sql.push_str(" WHERE ");
            sql.push_str(&fragment.sql);
            fragment.params
        };
        sql.push_str(" ORDER BY title, id");
        log_query(self.log_queries, &sql);

        let jobs = bind_all_as(sqlx::query_as::<_, Job>(&sql), &params)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn get(&self, id: i32) -> Result<Job, DatabaseError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_RETURNING);
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))
    }

    /// Partial update; only the supplied fields change. A new title is held to
    /// the same uniqueness rule as `create`.
    pub async fn update(&self, id: i32, data: &JobUpdate) -> Result<Job, DatabaseError> {
        if let Some(title) = &data.title {
            let taken = sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE title = $1 AND id <> $2 LIMIT 1")
                .bind(title)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

            if taken.is_some() {
                return Err(DatabaseError::Conflict(format!("Duplicate job: {}", title)));
            }
        }

        let fragment = sql_for_partial_update(&data.to_fields(), &JOB_COLUMNS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            fragment.sql,
            fragment.next_placeholder(),
            JOB_RETURNING
        );
        log_query(self.log_queries, &sql);

        bind_all_as(sqlx::query_as::<_, Job>(&sql), &fragment.params)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))
    }

    pub async fn remove(&self, id: i32) -> Result<(), DatabaseError> {
        let deleted = sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match deleted {
            Some(_) => {
                info!("Deleted job {}", id);
                Ok(())
            }
            None => Err(DatabaseError::NotFound(format!("No job: {}", id))),
        }
    }
}
