//! Chirp operations.

use chirpy_core::chirps::validate_body;
use chirpy_core::models::chirp::{ChirpQuery, ChirpSort};
use chirpy_core::store::Store;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ChirpResponse, ListChirpsParams};

/// Parse a chirp id taken from the request path.
pub fn parse_chirp_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("Invalid chirp ID".into()))
}

/// Turn raw query parameters into a typed listing query.
pub fn parse_list_params(params: &ListChirpsParams) -> AppResult<ChirpQuery> {
    let author_id = params
        .author_id
        .as_deref()
        .map(|raw| {
            Uuid::parse_str(raw).map_err(|_| AppError::Validation("Invalid author ID".into()))
        })
        .transpose()?;
    let sort = match params.sort.as_deref() {
        None => ChirpSort::default(),
        Some(raw) => raw.parse().map_err(AppError::Validation)?,
    };
    Ok(ChirpQuery { author_id, sort })
}

/// Post a chirp as `user_id`.
pub async fn create_chirp(
    store: &dyn Store,
    user_id: &Uuid,
    body: &str,
) -> AppResult<ChirpResponse> {
    validate_body(body)?;
    let chirp = store.create_chirp(user_id, body).await?;
    info!(%user_id, chirp_id = %chirp.id, "chirp created");
    Ok(ChirpResponse::from(chirp))
}

pub async fn list_chirps(store: &dyn Store, query: ChirpQuery) -> AppResult<Vec<ChirpResponse>> {
    let chirps = store.list_chirps(query).await?;
    Ok(chirps.into_iter().map(ChirpResponse::from).collect())
}

pub async fn get_chirp(store: &dyn Store, chirp_id: &Uuid) -> AppResult<ChirpResponse> {
    store
        .get_chirp(chirp_id)
        .await?
        .map(ChirpResponse::from)
        .ok_or_else(|| AppError::NotFound("Chirp not found".into()))
}

/// Delete a chirp on behalf of `caller`, who must be its author.
pub async fn delete_chirp(store: &dyn Store, caller: &Uuid, chirp_id: &Uuid) -> AppResult<()> {
    let chirp = store
        .get_chirp(chirp_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Chirp not found".into()))?;

    if chirp.user_id != *caller {
        info!(%caller, %chirp_id, "refused to delete another user's chirp");
        return Err(AppError::Forbidden("You can only delete your own chirps".into()));
    }

    if !store.delete_chirp(chirp_id).await? {
        return Err(AppError::NotFound("Chirp not found".into()));
    }
    info!(%caller, %chirp_id, "chirp deleted");
    Ok(())
}
