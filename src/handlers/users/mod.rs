// handlers/users/mod.rs - /users routes
//
// Listing and creating users is admin-only. A single user can be read,
// patched or deleted by an admin or by that user.

pub mod collection; // GET, POST /users
pub mod record; // GET, PATCH, DELETE /users/:username

pub use collection::{collection_get, collection_post};
pub use record::{record_delete, record_get, record_patch};
