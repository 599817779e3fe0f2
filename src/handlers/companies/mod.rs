// handlers/companies/mod.rs - /companies routes
//
// Reads are public; writes require an admin token.

pub mod collection; // GET, POST /companies
pub mod record; // GET, PATCH, DELETE /companies/:handle

pub use collection::{collection_get, collection_post};
pub use record::{record_delete, record_get, record_patch};
