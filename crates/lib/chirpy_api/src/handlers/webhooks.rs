//! Third-party webhook receivers.

use axum::extract::State;
use axum::http::StatusCode;
use tracing::debug;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::models::PolkaWebhookRequest;
use crate::services::users;

/// The only Polka event Chirpy acts on.
const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// `POST /api/polka/webhooks` — payment notifications from Polka. Requires the
/// partner API key. Unknown events are acknowledged and ignored.
pub async fn polka_webhook_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<PolkaWebhookRequest>,
) -> AppResult<StatusCode> {
    if body.event != USER_UPGRADED_EVENT {
        debug!(event = %body.event, "ignoring polka event");
        return Ok(StatusCode::NO_CONTENT);
    }
    users::upgrade_user(state.store.as_ref(), &body.data.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
