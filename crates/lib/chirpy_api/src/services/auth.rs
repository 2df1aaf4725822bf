//! Authentication service: login, refresh and revoke flows delegating to
//! `chirpy_core::auth`.

use chirpy_core::auth::{jwt, password, refresh};
use chirpy_core::store::Store;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{LoginResponse, TokenResponse, UserResponse};

// ---------------------------------------------------------------------------
// Password hashing (bcrypt is slow on purpose, so keep it off the reactor)
// ---------------------------------------------------------------------------

/// Hash a password on the blocking pool.
pub async fn hash_password(plain: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| AppError::Internal(format!("hash task: {e}")))?
        .map_err(AppError::from)
}

/// Verify a password on the blocking pool.
pub async fn verify_password(plain: String, hash: String) -> AppResult<()> {
    tokio::task::spawn_blocking(move || password::verify_password(&plain, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verify task: {e}")))?
        .map_err(AppError::from)
}

/// Spend a verification's worth of bcrypt work on a login for an unknown email.
async fn reject_unknown_user(plain: String) -> AppResult<()> {
    tokio::task::spawn_blocking(move || password::reject_unknown_user(&plain))
        .await
        .map_err(|e| AppError::Internal(format!("verify task: {e}")))?
        .map_err(AppError::from)
}

// ---------------------------------------------------------------------------
// Public auth operations
// ---------------------------------------------------------------------------

/// Authenticate with email + password and issue an access/refresh token pair.
///
/// Unknown email and wrong password produce the same error.
pub async fn login(
    store: &dyn Store,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<LoginResponse> {
    let Some(found) = store.find_user_by_email(email).await? else {
        reject_unknown_user(password.to_string()).await?;
        return Err(AppError::Unauthorized("Incorrect email or password".into()));
    };

    verify_password(password.to_string(), found.hashed_password).await?;

    let token = jwt::mint_access_token(&found.user.id, jwt_secret)?;
    let refresh_token = refresh::issue(store, &found.user.id).await?;

    info!(user_id = %found.user.id, "user logged in");

    Ok(LoginResponse {
        user: UserResponse::from(found.user),
        token,
        refresh_token: refresh_token.token,
    })
}

/// Mint a fresh access token for the owner of an already validated refresh token.
pub fn refresh_access_token(user_id: &Uuid, jwt_secret: &[u8]) -> AppResult<TokenResponse> {
    let token = jwt::mint_access_token(user_id, jwt_secret)?;
    Ok(TokenResponse { token })
}

/// Revoke a refresh token.
pub async fn revoke_refresh_token(
    store: &dyn Store,
    user_id: &Uuid,
    token: &str,
) -> AppResult<()> {
    refresh::revoke(store, token).await?;
    info!(%user_id, "refresh token revoked");
    Ok(())
}
