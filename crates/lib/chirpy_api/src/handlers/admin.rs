//! Admin request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::services::users;

/// `POST /admin/reset` — delete all users. Only available on the `dev` platform.
pub async fn reset_handler(State(state): State<AppState>) -> AppResult<StatusCode> {
    if !state.config.is_dev() {
        warn!(platform = %state.config.platform, "reset attempted outside dev");
        return Err(AppError::Forbidden(
            "Reset is only allowed in the dev environment".into(),
        ));
    }
    users::reset_users(state.store.as_ref()).await?;
    Ok(StatusCode::OK)
}
