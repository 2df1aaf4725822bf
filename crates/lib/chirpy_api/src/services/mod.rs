//! Business operations behind the handlers.

pub mod auth;
pub mod chirps;
pub mod users;
