//! `Authorization` header parsing.

use http::HeaderMap;
use http::header::AUTHORIZATION;

use super::AuthError;

const BEARER_SCHEME: &str = "Bearer";
const API_KEY_SCHEME: &str = "ApiKey";

/// Extract the token from `Authorization: Bearer <token>`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, AuthError> {
    extract_scheme(headers, BEARER_SCHEME)
}

/// Extract the key from `Authorization: ApiKey <key>`.
pub fn extract_api_key(headers: &HeaderMap) -> Result<String, AuthError> {
    extract_scheme(headers, API_KEY_SCHEME)
}

/// Check `Authorization: ApiKey <key>` against the configured partner key.
pub fn authorize_api_key(headers: &HeaderMap, expected: &str) -> Result<(), AuthError> {
    let key = extract_api_key(headers)?;
    if key != expected {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}

// Scheme match is case-sensitive; whatever follows it, trimmed, is the credential.
fn extract_scheme(headers: &HeaderMap, scheme: &str) -> Result<String, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;
    let credential = value
        .strip_prefix(scheme)
        .map(str::trim)
        .ok_or(AuthError::MissingCredentials)?;
    if credential.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(credential.to_string())
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_trimmed() {
        assert_eq!(extract_bearer(&headers("Bearer   abc123")).unwrap(), "abc123");
        assert_eq!(extract_bearer(&headers("Bearer abc123  ")).unwrap(), "abc123");
    }

    #[test]
    fn other_schemes_are_missing() {
        assert!(matches!(
            extract_bearer(&headers("Basic abc123")),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            extract_bearer(&headers("bearer abc123")),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn absent_header_is_missing() {
        assert!(matches!(
            extract_bearer(&HeaderMap::new()),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn empty_credential_is_missing() {
        assert!(matches!(
            extract_bearer(&headers("Bearer    ")),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn api_key_is_extracted() {
        assert_eq!(
            extract_api_key(&headers("ApiKey f271c81ff7084ee5")).unwrap(),
            "f271c81ff7084ee5"
        );
        assert!(extract_api_key(&headers("Bearer f271c81ff7084ee5")).is_err());
    }

    #[test]
    fn api_key_must_match_exactly() {
        let h = headers("ApiKey secret-key");
        assert!(authorize_api_key(&h, "secret-key").is_ok());
        assert!(authorize_api_key(&h, "secret-key2").is_err());
        assert!(authorize_api_key(&h, "SECRET-KEY").is_err());
    }
}
