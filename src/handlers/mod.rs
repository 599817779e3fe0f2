// handlers/mod.rs - one module per resource
//
// Access rules live in the handler signatures: an `Admin` or
// `AdminOrCorrectUser` argument rejects with 401 before the body is read.
// `LoggedIn` and `CorrectUser` are available for routes that need them.

pub mod auth;
pub mod companies;
pub mod jobs;
pub mod users;
