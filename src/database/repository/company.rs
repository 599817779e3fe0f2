use sqlx::PgPool;
use tracing::info;

use super::{constraint_error, log_query};
use crate::database::manager::DatabaseError;
use crate::database::models::company::{COMPANY_COLUMNS, COMPANY_FILTER_COLUMNS, COMPANY_FILTER_RULES};
use crate::database::models::{Company, CompanyDetail, CompanyFilter, CompanyNew, CompanyUpdate, JobSummary};
use crate::sql::bind::bind_all_as;
use crate::sql::{sql_for_filtering, sql_for_partial_update};

const COMPANY_RETURNING: &str = "handle, name, description, num_employees, logo_url";

/// Data access for `companies`, keyed by `handle`.
pub struct CompanyRepository {
    pool: PgPool,
    log_queries: bool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, log_queries: false }
    }

    pub fn log_queries(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    pub async fn create(&self, data: &CompanyNew) -> Result<Company, DatabaseError> {
        let duplicate = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
            .bind(&data.handle)
            .fetch_optional(&self.pool)
            .await?;

        if duplicate.is_some() {
            return Err(DatabaseError::Conflict(format!("Duplicate company: {}", data.handle)));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            COMPANY_RETURNING
        );
        log_query(self.log_queries, &sql);

        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(&data.handle)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.num_employees)
            .bind(&data.logo_url)
            .fetch_one(&self.pool)
            .await
            // name is UNIQUE too
            .map_err(|e| constraint_error(e, || format!("Duplicate company name: {}", data.name), String::new))?;

        info!("Created company {}", company.handle);
        Ok(company)
    }

    /// All companies ordered by name, narrowed by whichever filters are set.
    pub async fn find_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DatabaseError> {
        let criteria = filter.to_criteria();
        let mut sql = format!("SELECT {} FROM companies", COMPANY_RETURNING);

        let params = if criteria.is_empty() {
            Vec::new()
        } else {
            let fragment = sql_for_filtering(&criteria, &COMPANY_FILTER_RULES, &COMPANY_FILTER_COLUMNS)?;
            sql.push_str(" WHERE ");
            sql.push_str(&fragment.sql);
            fragment.params
        };
        sql.push_str(" ORDER BY name");
        log_query(self.log_queries, &sql);

        let companies = bind_all_as(sqlx::query_as::<_, Company>(&sql), &params)
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    /// Company plus its jobs, ordered by job id.
    pub async fn get(&self, handle: &str) -> Result<CompanyDetail, DatabaseError> {
        let sql = format!("SELECT {} FROM companies WHERE handle = $1", COMPANY_RETURNING);
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, JobSummary>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    pub async fn update(&self, handle: &str, data: &CompanyUpdate) -> Result<Company, DatabaseError> {
        let fragment = sql_for_partial_update(&data.to_fields(), &COMPANY_COLUMNS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            fragment.sql,
            fragment.next_placeholder(),
            COMPANY_RETURNING
        );
        log_query(self.log_queries, &sql);

        bind_all_as(sqlx::query_as::<_, Company>(&sql), &fragment.params)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                constraint_error(
                    e,
                    || format!("Duplicate company name: {}", data.name.as_deref().unwrap_or_default()),
                    String::new,
                )
            })?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))
    }

    pub async fn remove(&self, handle: &str) -> Result<(), DatabaseError> {
        let deleted = sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?;

        match deleted {
            Some(_) => {
                info!("Deleted company {}", handle);
                Ok(())
            }
            None => Err(DatabaseError::NotFound(format!("No company: {}", handle))),
        }
    }
}
