use sqlx::PgPool;
use tracing::{debug, info};

use super::{constraint_error, log_query};
use crate::auth::PasswordHasher;
use crate::database::manager::DatabaseError;
use crate::database::models::user::{UserCredentials, USER_COLUMNS};
use crate::database::models::{User, UserNew, UserUpdate};
use crate::sql::bind::bind_all_as;
use crate::sql::sql_for_partial_update;

const USER_RETURNING: &str = "username, first_name, last_name, email, is_admin";

/// Data access for `users`, keyed by `username`. Passwords are stored as argon2 hashes.
pub struct UserRepository {
    pool: PgPool,
    hasher: PasswordHasher,
    log_queries: bool,
}

impl UserRepository {
    pub fn new(pool: PgPool, hasher: PasswordHasher) -> Self {
        Self { pool, hasher, log_queries: false }
    }

    pub fn log_queries(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Returns the user when the password matches, `InvalidCredentials` otherwise.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DatabaseError> {
        let sql = format!("SELECT password, {} FROM users WHERE username = $1", USER_RETURNING);
        let row = sqlx::query_as::<_, UserCredentials>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            debug!("Authentication failed: no user {}", username);
            return Err(DatabaseError::InvalidCredentials);
        };

        let valid = self
            .hasher
            .verify_blocking(password.to_string(), row.password.clone())
            .await?;
        if !valid {
            debug!("Authentication failed: bad password for {}", username);
            return Err(DatabaseError::InvalidCredentials);
        }

        Ok(row.into())
    }

    pub async fn register(&self, data: &UserNew) -> Result<User, DatabaseError> {
        let duplicate = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(&data.username)
            .fetch_optional(&self.pool)
            .await?;

        if duplicate.is_some() {
            return Err(DatabaseError::Conflict(format!("Duplicate username: {}", data.username)));
        }

        let hashed = self.hasher.hash_blocking(data.password.clone()).await?;

        let sql = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_RETURNING
        );
        log_query(self.log_queries, &sql);

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&data.username)
            .bind(&hashed)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(data.is_admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| constraint_error(e, || format!("Duplicate username: {}", data.username), String::new))?;

        info!("Registered user {}", user.username);
        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users ORDER BY username", USER_RETURNING);
        log_query(self.log_queries, &sql);
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn get(&self, username: &str) -> Result<User, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_RETURNING);
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))
    }

    /// Partial update. A supplied password is hashed before it is written.
    pub async fn update(&self, username: &str, data: &UserUpdate) -> Result<User, DatabaseError> {
        let password_hash = match &data.password {
            Some(plain) => Some(self.hasher.hash_blocking(plain.clone()).await?),
            None => None,
        };

        let fragment = sql_for_partial_update(&data.to_fields(password_hash), &USER_COLUMNS)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = ${} RETURNING {}",
            fragment.sql,
            fragment.next_placeholder(),
            USER_RETURNING
        );
        log_query(self.log_queries, &sql);

        bind_all_as(sqlx::query_as::<_, User>(&sql), &fragment.params)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No user: {}", username)))
    }

    pub async fn remove(&self, username: &str) -> Result<(), DatabaseError> {
        let deleted = sqlx::query_scalar::<_, String>("DELETE FROM users WHERE username = $1 RETURNING username")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        match deleted {
            Some(_) => {
                info!("Deleted user {}", username);
                Ok(())
            }
            None => Err(DatabaseError::NotFound(format!("No user: {}", username))),
        }
    }
}
