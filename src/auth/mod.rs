pub mod password;
pub mod token;

pub use password::{PasswordError, PasswordHasher};
pub use token::{create_token, encode_claims, verify_token, Claims, JwtError};
