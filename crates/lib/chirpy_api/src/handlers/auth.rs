//! Authentication request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::RefreshSession;
use crate::models::{CredentialsRequest, LoginResponse, TokenResponse};
use crate::services::auth;

/// `POST /api/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<CredentialsRequest>,
) -> AppResult<Json<LoginResponse>> {
    let resp = auth::login(
        state.store.as_ref(),
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `POST /api/refresh` — exchange a refresh token for a new access token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Extension(session): Extension<RefreshSession>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::refresh_access_token(&session.user_id, state.config.jwt_secret.as_bytes())?;
    Ok(Json(resp))
}

/// `POST /api/revoke` — revoke the presented refresh token.
pub async fn revoke_handler(
    State(state): State<AppState>,
    Extension(session): Extension<RefreshSession>,
) -> AppResult<StatusCode> {
    auth::revoke_refresh_token(state.store.as_ref(), &session.user_id, &session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
