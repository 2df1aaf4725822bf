//! Chirp request handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{ChirpResponse, CreateChirpRequest, ListChirpsParams};
use crate::services::chirps;

/// `POST /api/chirps` — post a chirp as the authenticated user.
pub async fn create_chirp_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<CreateChirpRequest>,
) -> AppResult<(StatusCode, Json<ChirpResponse>)> {
    let chirp = chirps::create_chirp(state.store.as_ref(), &user.0, &body.body).await?;
    Ok((StatusCode::CREATED, Json(chirp)))
}

/// `GET /api/chirps` — list chirps, optionally by author, sorted by creation time.
pub async fn list_chirps_handler(
    State(state): State<AppState>,
    Query(params): Query<ListChirpsParams>,
) -> AppResult<Json<Vec<ChirpResponse>>> {
    let query = chirps::parse_list_params(&params)?;
    let list = chirps::list_chirps(state.store.as_ref(), query).await?;
    Ok(Json(list))
}

/// `GET /api/chirps/{chirp_id}` — fetch one chirp.
pub async fn get_chirp_handler(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> AppResult<Json<ChirpResponse>> {
    let chirp_id = chirps::parse_chirp_id(&chirp_id)?;
    let chirp = chirps::get_chirp(state.store.as_ref(), &chirp_id).await?;
    Ok(Json(chirp))
}

/// `DELETE /api/chirps/{chirp_id}` — delete one of the caller's own chirps.
pub async fn delete_chirp_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(chirp_id): Path<String>,
) -> AppResult<StatusCode> {
    let chirp_id = chirps::parse_chirp_id(&chirp_id)?;
    chirps::delete_chirp(state.store.as_ref(), &user.0, &chirp_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
