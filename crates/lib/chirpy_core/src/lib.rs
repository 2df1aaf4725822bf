//! # chirpy_core
//!
//! Core domain logic for Chirpy: credentials, tokens, chirps and the
//! persistence seams they rely on.

pub mod auth;
pub mod chirps;
pub mod models;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
