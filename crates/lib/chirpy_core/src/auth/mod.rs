//! Authentication and authorization logic.
//!
//! Provides password hashing, access-token (JWT) minting and verification,
//! refresh-token lifecycle, and `Authorization` header parsing. Nothing here
//! holds shared mutable state; refresh tokens are persisted through a
//! [`RefreshTokenStore`](crate::store::RefreshTokenStore).

pub mod extract;
pub mod jwt;
pub mod password;
pub mod refresh;

use thiserror::Error;

use crate::store::StoreError;

/// Why an access token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("bad signature")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("subject is not a user id")]
    MalformedSubject,

    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Invalid credentials")]
    PasswordMismatch,

    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Invalid access token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token revoked")]
    RefreshTokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// True when the caller presented a bad or missing credential, as opposed
    /// to the server failing to process a good one.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AuthError::PasswordMismatch
                | AuthError::MissingCredentials
                | AuthError::InvalidToken(_)
                | AuthError::RefreshTokenNotFound
                | AuthError::RefreshTokenRevoked
                | AuthError::RefreshTokenExpired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_are_classified() {
        assert!(AuthError::MissingCredentials.is_authentication_failure());
        assert!(AuthError::InvalidToken(TokenError::Expired).is_authentication_failure());
        assert!(AuthError::RefreshTokenRevoked.is_authentication_failure());
        assert!(!AuthError::Hashing("rng".into()).is_authentication_failure());
        assert!(!AuthError::Internal("x".into()).is_authentication_failure());
    }
}
