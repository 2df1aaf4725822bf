//! Domain models.
//!
//! These are internal domain models, distinct from the HTTP request and
//! response records in `chirpy_api`.

pub mod auth;
pub mod chirp;
