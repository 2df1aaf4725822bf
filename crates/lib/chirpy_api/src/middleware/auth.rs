//! Authentication middleware.
//!
//! Each layer extracts a credential from the `Authorization` header, validates
//! it, and either stores the resolved identity in request extensions or
//! rejects the request with 401 before the handler runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chirpy_core::auth::extract::{authorize_api_key, extract_bearer};
use chirpy_core::auth::jwt::verify_access_token;
use chirpy_core::auth::refresh;
use tracing::debug;
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;

/// Identity resolved from a valid access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

/// Refresh token that passed lookup and validation, with its owner.
#[derive(Debug, Clone)]
pub struct RefreshSession {
    pub user_id: Uuid,
    pub token: String,
}

/// Axum middleware: extracts `Authorization: Bearer <jwt>`, verifies it,
/// and injects [`AuthenticatedUser`] into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(request.headers())?;

    let user_id = verify_access_token(&token, state.config.jwt_secret.as_bytes())
        .inspect_err(|e| debug!("access token rejected: {e}"))?;

    request.extensions_mut().insert(AuthenticatedUser(user_id));

    Ok(next.run(request).await)
}

/// Axum middleware: extracts `Authorization: Bearer <refresh token>`, looks it
/// up, rejects revoked or expired tokens, and injects [`RefreshSession`].
pub async fn require_refresh_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(request.headers())?;

    let user_id = refresh::authenticate(state.store.as_ref(), &token).await?;

    request
        .extensions_mut()
        .insert(RefreshSession { user_id, token });

    Ok(next.run(request).await)
}

/// Axum middleware: requires `Authorization: ApiKey <key>` matching the
/// configured Polka key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize_api_key(request.headers(), &state.config.polka_key).inspect_err(|_| {
        debug!("webhook call with missing or wrong API key");
    })?;

    Ok(next.run(request).await)
}
