// handlers/jobs/mod.rs - /jobs routes
//
// Reads are public; writes require an admin token.

pub mod collection; // GET, POST /jobs
pub mod record; // GET, PATCH, DELETE /jobs/:id

pub use collection::{collection_get, collection_post};
pub use record::{record_delete, record_get, record_patch};
