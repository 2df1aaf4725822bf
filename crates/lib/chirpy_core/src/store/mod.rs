//! Persistence seams.
//!
//! Handlers and services talk to storage only through the traits in this
//! module. Two backends are provided: [`PgStore`] over a PostgreSQL pool and
//! [`MemoryStore`] for local development and tests. Both guarantee that a
//! completed write is visible to every later read.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::auth::{RefreshTokenRecord, User, UserWithPassword};
use crate::models::chirp::{Chirp, ChirpQuery};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A write referenced a user that does not exist (e.g. deleted by a reset).
    #[error("Unknown user: {0}")]
    UnknownUser(Uuid),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// User records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str)
    -> Result<Option<UserWithPassword>, StoreError>;

    async fn get_user(&self, user_id: &Uuid) -> Result<Option<User>, StoreError>;

    /// Replace email and password hash. Returns `None` if the user is gone.
    async fn update_user(
        &self,
        user_id: &Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Set the upgrade flag. Returns `false` if no such user exists.
    async fn upgrade_user(&self, user_id: &Uuid) -> Result<bool, StoreError>;

    /// Delete every user together with their chirps and refresh tokens.
    async fn reset_users(&self) -> Result<(), StoreError>;
}

/// Chirp records.
#[async_trait]
pub trait ChirpStore: Send + Sync {
    /// Fails with [`StoreError::UnknownUser`] when the author does not exist.
    async fn create_chirp(&self, user_id: &Uuid, body: &str) -> Result<Chirp, StoreError>;

    async fn list_chirps(&self, query: ChirpQuery) -> Result<Vec<Chirp>, StoreError>;

    async fn get_chirp(&self, chirp_id: &Uuid) -> Result<Option<Chirp>, StoreError>;

    /// Returns `false` if nothing was deleted.
    async fn delete_chirp(&self, chirp_id: &Uuid) -> Result<bool, StoreError>;
}

/// Refresh token records. Records are never deleted by revocation.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Fails with [`StoreError::UnknownUser`] when the owner does not exist.
    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), StoreError>;

    async fn find_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, StoreError>;

    /// Mark a token revoked at `at`. Already revoked or unknown tokens are left untouched.
    async fn revoke_refresh_token(&self, token: &str, at: DateTime<Utc>)
    -> Result<(), StoreError>;
}

/// Everything the HTTP layer needs from one backend.
pub trait Store: UserStore + ChirpStore + RefreshTokenStore {}

impl<T: UserStore + ChirpStore + RefreshTokenStore> Store for T {}
