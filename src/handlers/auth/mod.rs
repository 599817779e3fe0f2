// handlers/auth/mod.rs - token acquisition, no authentication required

pub mod register; // POST /auth/register
pub mod token; // POST /auth/token

pub use register::register_post;
pub use token::token_post;
