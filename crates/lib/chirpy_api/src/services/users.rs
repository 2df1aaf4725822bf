//! User account operations.

use chirpy_core::store::Store;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::UserResponse;
use crate::services::auth::hash_password;

fn require_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".into()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }
    Ok(())
}

/// Register a new user account.
pub async fn create_user(
    store: &dyn Store,
    email: &str,
    password: &str,
) -> AppResult<UserResponse> {
    require_credentials(email, password)?;
    let hashed = hash_password(password.to_string()).await?;
    let user = store.create_user(email, &hashed).await?;
    info!(user_id = %user.id, "user created");
    Ok(UserResponse::from(user))
}

/// Replace the caller's own email and password.
pub async fn update_user(
    store: &dyn Store,
    user_id: &Uuid,
    email: &str,
    password: &str,
) -> AppResult<UserResponse> {
    require_credentials(email, password)?;
    let hashed = hash_password(password.to_string()).await?;
    let user = store
        .update_user(user_id, email, &hashed)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    info!(%user_id, "user updated");
    Ok(UserResponse::from(user))
}

/// Mark a user as upgraded to Chirpy Red.
pub async fn upgrade_user(store: &dyn Store, user_id: &Uuid) -> AppResult<()> {
    if !store.upgrade_user(user_id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }
    info!(%user_id, "user upgraded to chirpy red");
    Ok(())
}

/// Delete every user (development only; callers check the platform).
pub async fn reset_users(store: &dyn Store) -> AppResult<()> {
    store.reset_users().await?;
    info!("all users deleted");
    Ok(())
}
