//! Typed request bodies and query strings, each with a `from_json` / `from_query`
//! constructor that reports every violation at once.

mod company;
mod job;
mod user;

pub use user::UserAuth;
