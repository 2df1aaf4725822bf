//! User account request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CredentialsRequest, UserResponse};
use crate::services::users;

/// `POST /api/users` — create a new user account.
pub async fn create_user_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = users::create_user(state.store.as_ref(), &body.email, &body.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /api/users` — change the caller's email and password. Requires authentication.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<CredentialsRequest>,
) -> AppResult<Json<UserResponse>> {
    let updated =
        users::update_user(state.store.as_ref(), &user.0, &body.email, &body.password).await?;
    Ok(Json(updated))
}
