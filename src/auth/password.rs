use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("password hashing task failed: {0}")]
    Task(String),
}

/// Argon2 hasher. `fast` selects minimal parameters for test runs.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    fast: bool,
}

impl PasswordHasher {
    pub fn new(fast: bool) -> Self {
        Self { fast }
    }

    fn argon2(&self) -> Argon2<'static> {
        if self.fast {
            match Params::new(Params::MIN_M_COST, 1, 1, None) {
                Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
                Err(_) => Argon2::default(),
            }
        } else {
            Argon2::default()
        }
    }

    pub fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    pub fn verify(&self, plain: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => self.argon2().verify_password(plain.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }

    /// Hashes on the blocking pool so request tasks are not stalled.
    pub async fn hash_blocking(&self, plain: String) -> Result<String, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }

    pub async fn verify_blocking(&self, plain: String, stored_hash: String) -> Result<bool, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&plain, &stored_hash))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))
    }
}
