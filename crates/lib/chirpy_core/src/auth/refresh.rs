//! Refresh token lifecycle.
//!
//! Refresh tokens are opaque: 32 bytes from the OS-seeded thread RNG,
//! hex-encoded. They are persisted through a [`RefreshTokenStore`] and are
//! only ever revoked, never deleted.

use chrono::{DateTime, Duration, Utc};
use rand::{RngCore, rng};
use tracing::debug;
use uuid::Uuid;

use super::AuthError;
use crate::models::auth::RefreshTokenRecord;
use crate::store::RefreshTokenStore;

/// Number of random bytes in a refresh token (64 hex characters).
const REFRESH_TOKEN_BYTES: usize = 32;

/// Refresh token lifetime: 60 days.
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 60;

/// Generate a cryptographically random refresh token (64 lowercase hex chars).
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Create and persist a new refresh token for `user_id`.
pub async fn issue<S>(store: &S, user_id: &Uuid) -> Result<RefreshTokenRecord, AuthError>
where
    S: RefreshTokenStore + ?Sized,
{
    let now = Utc::now();
    let record = RefreshTokenRecord {
        token: generate_refresh_token(),
        user_id: *user_id,
        created_at: now,
        updated_at: now,
        expires_at: now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        revoked_at: None,
    };
    store.insert_refresh_token(&record).await?;
    Ok(record)
}

/// Fetch the record for an exact token value.
pub async fn lookup<S>(store: &S, token: &str) -> Result<RefreshTokenRecord, AuthError>
where
    S: RefreshTokenStore + ?Sized,
{
    store
        .find_refresh_token(token)
        .await?
        .ok_or(AuthError::RefreshTokenNotFound)
}

/// Check a record against `now`. Revocation is reported before expiry.
pub fn validate_at(record: &RefreshTokenRecord, now: DateTime<Utc>) -> Result<Uuid, AuthError> {
    if record.revoked_at.is_some() {
        return Err(AuthError::RefreshTokenRevoked);
    }
    if now > record.expires_at {
        return Err(AuthError::RefreshTokenExpired);
    }
    Ok(record.user_id)
}

/// Check a record against the current time.
pub fn validate(record: &RefreshTokenRecord) -> Result<Uuid, AuthError> {
    validate_at(record, Utc::now())
}

/// Look up and validate a presented token, returning its owner.
pub async fn authenticate<S>(store: &S, token: &str) -> Result<Uuid, AuthError>
where
    S: RefreshTokenStore + ?Sized,
{
    let record = lookup(store, token).await?;
    validate(&record).inspect_err(|e| {
        debug!(user_id = %record.user_id, "refresh token rejected: {e}");
    })
}

/// Revoke a token. Revoking twice, or revoking an unknown token, succeeds.
pub async fn revoke<S>(store: &S, token: &str) -> Result<(), AuthError>
where
    S: RefreshTokenStore + ?Sized,
{
    store.revoke_refresh_token(token, Utc::now()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::store::{MemoryStore, UserStore};

    fn is_lower_hex_64(s: &str) -> bool {
        s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    #[test]
    fn token_is_64_lowercase_hex() {
        let token = generate_refresh_token();
        assert!(is_lower_hex_64(&token), "unexpected shape: {token}");
    }

    #[test]
    fn tokens_are_unique() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_refresh_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[tokio::test]
    async fn issue_persists_a_live_record() {
        let store = MemoryStore::new();
        let user_id = store.create_user("a@example.com", "h").await.unwrap().id;
        let record = issue(&store, &user_id).await.unwrap();

        assert!(is_lower_hex_64(&record.token));
        assert!(record.revoked_at.is_none());
        assert_eq!(
            record.expires_at - record.created_at,
            Duration::days(REFRESH_TOKEN_EXPIRY_DAYS)
        );
        assert_eq!(lookup(&store, &record.token).await.unwrap(), record);
        assert_eq!(authenticate(&store, &record.token).await.unwrap(), user_id);
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let store = MemoryStore::new();
        let err = authenticate(&store, &generate_refresh_token()).await.unwrap_err();
        assert!(matches!(err, AuthError::RefreshTokenNotFound));
    }

    #[tokio::test]
    async fn revoked_token_is_rejected_and_revoke_is_idempotent() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com", "h").await.unwrap();
        let record = issue(&store, &user.id).await.unwrap();

        revoke(&store, &record.token).await.unwrap();
        revoke(&store, &record.token).await.unwrap();

        let err = authenticate(&store, &record.token).await.unwrap_err();
        assert!(matches!(err, AuthError::RefreshTokenRevoked));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let record = RefreshTokenRecord {
            token: generate_refresh_token(),
            user_id: Uuid::new_v4(),
            created_at: now - Duration::days(61),
            updated_at: now - Duration::days(61),
            expires_at: now - Duration::days(1),
            revoked_at: None,
        };
        assert!(matches!(
            validate_at(&record, now),
            Err(AuthError::RefreshTokenExpired)
        ));
    }

    #[test]
    fn revocation_takes_precedence_over_expiry() {
        let now = Utc::now();
        let record = RefreshTokenRecord {
            token: generate_refresh_token(),
            user_id: Uuid::new_v4(),
            created_at: now - Duration::days(61),
            updated_at: now - Duration::days(2),
            expires_at: now - Duration::days(1),
            revoked_at: Some(now - Duration::days(2)),
        };
        assert!(matches!(
            validate_at(&record, now),
            Err(AuthError::RefreshTokenRevoked)
        ));
    }

    #[test]
    fn refresh_tokens_outlive_access_tokens() {
        assert!(
            Duration::days(REFRESH_TOKEN_EXPIRY_DAYS)
                > Duration::seconds(crate::auth::jwt::ACCESS_TOKEN_EXPIRY_SECS)
        );
    }
}
