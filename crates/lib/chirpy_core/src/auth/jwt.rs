//! JWT access token generation and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use super::{AuthError, TokenError};
use crate::models::auth::AccessClaims;

/// Issuer written into and required from every access token.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy";

/// Access token lifetime: 1 hour. Not configurable by callers.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 60 * 60;

/// Generate a signed JWT access token (HS256, 1 hour expiry).
pub fn mint_access_token(user_id: &Uuid, secret: &[u8]) -> Result<String, AuthError> {
    mint_access_token_at(user_id, secret, Utc::now())
}

/// Generate an access token as if it had been issued at `issued_at`.
pub fn mint_access_token_at(
    user_id: &Uuid,
    secret: &[u8],
    issued_at: DateTime<Utc>,
) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::Internal("empty JWT signing secret".into()));
    }
    let claims = AccessClaims {
        iss: ACCESS_TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: issued_at.timestamp(),
        exp: (issued_at + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify a JWT access token, returning the user ID it was issued to.
///
/// The signature is checked before any claim is looked at; expiry is checked
/// with zero leeway before the subject is parsed.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Result<Uuid, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::Internal("empty JWT signing secret".into()));
    }
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let data = decode::<AccessClaims>(token, &key, &validation).map_err(classify)?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::MalformedSubject.into())
}

fn classify(e: jsonwebtoken::errors::Error) -> AuthError {
    let kind = match e.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(e.to_string()),
    };
    AuthError::InvalidToken(kind)
}
