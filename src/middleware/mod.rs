pub mod auth;
pub mod response;

pub use auth::{authenticate_jwt, Admin, AdminOrCorrectUser, AuthUser, CorrectUser, LoggedIn};
pub use response::{ApiResponse, ApiResult};
