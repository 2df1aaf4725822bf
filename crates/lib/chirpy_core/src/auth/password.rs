//! Password hashing via bcrypt.

use std::sync::LazyLock;

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash checked when a login names no known user, so both failures cost the same.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| bcrypt::hash("chirpy-unknown-user", BCRYPT_COST).ok());

/// Hash a password with bcrypt (cost 10). Each call embeds a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Hashing(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
///
/// A malformed stored hash is reported as a mismatch, never as an internal error.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    match bcrypt::verify(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(AuthError::PasswordMismatch),
    }
}

/// Do the bcrypt work of [`verify_password`] for a login without a matching
/// user. Always fails with [`AuthError::PasswordMismatch`].
pub fn reject_unknown_user(password: &str) -> Result<(), AuthError> {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = bcrypt::verify(password, hash);
    }
    Err(AuthError::PasswordMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password() {
        let hash = hash_password("04234").unwrap();
        assert!(verify_password("04234", &hash).is_ok());
    }

    #[test]
    fn wrong_password_is_a_mismatch() {
        let hash = hash_password("correct horse").unwrap();
        let err = verify_password("battery staple", &hash).unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a).is_ok());
        assert!(verify_password("same", &b).is_ok());
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        let err = verify_password("anything", "not-a-bcrypt-hash").unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[test]
    fn hash_does_not_contain_plaintext() {
        let hash = hash_password("plaintext-secret").unwrap();
        assert!(!hash.contains("plaintext-secret"));
    }

    #[test]
    fn unknown_user_is_always_a_mismatch() {
        assert!(matches!(
            reject_unknown_user("chirpy-unknown-user"),
            Err(AuthError::PasswordMismatch)
        ));
        assert!(matches!(
            reject_unknown_user("anything"),
            Err(AuthError::PasswordMismatch)
        ));
    }
}
