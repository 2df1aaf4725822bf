//! In-process backend.
//!
//! All tables sit behind one `RwLock`, so every write is visible to the next
//! read on any task once the call returns.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ChirpStore, RefreshTokenStore, StoreError, UserStore};
use crate::models::auth::{RefreshTokenRecord, User, UserWithPassword};
use crate::models::chirp::{Chirp, ChirpQuery, ChirpSort};
use crate::uuid::uuidv7;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, UserWithPassword>,
    chirps: HashMap<Uuid, Chirp>,
    refresh_tokens: HashMap<String, RefreshTokenRecord>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<&Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.user.email == email && Some(&u.user.id) != except)
    }
}

/// Store kept entirely in memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(email, None) {
            return Err(StoreError::Conflict("email already exists".into()));
        }
        let now = Utc::now();
        let user = User {
            id: uuidv7(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            is_chirpy_red: false,
        };
        tables.users.insert(
            user.id,
            UserWithPassword {
                user: user.clone(),
                hashed_password: hashed_password.to_string(),
            },
        );
        Ok(user)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.user.email == email)
            .cloned())
    }

    async fn get_user(&self, user_id: &Uuid) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(user_id).map(|u| u.user.clone()))
    }

    async fn update_user(
        &self,
        user_id: &Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(email, Some(user_id)) {
            return Err(StoreError::Conflict("email already exists".into()));
        }
        let Some(entry) = tables.users.get_mut(user_id) else {
            return Ok(None);
        };
        entry.user.email = email.to_string();
        entry.user.updated_at = Utc::now();
        entry.hashed_password = hashed_password.to_string();
        Ok(Some(entry.user.clone()))
    }

    async fn upgrade_user(&self, user_id: &Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(user_id) {
            Some(entry) => {
                entry.user.is_chirpy_red = true;
                entry.user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reset_users(&self) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.users.clear();
        tables.chirps.clear();
        tables.refresh_tokens.clear();
        Ok(())
    }
}

#[async_trait]
impl ChirpStore for MemoryStore {
    async fn create_chirp(&self, user_id: &Uuid, body: &str) -> Result<Chirp, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(user_id) {
            return Err(StoreError::UnknownUser(*user_id));
        }
        let now = Utc::now();
        let chirp = Chirp {
            id: uuidv7(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id: *user_id,
        };
        tables.chirps.insert(chirp.id, chirp.clone());
        Ok(chirp)
    }

    async fn list_chirps(&self, query: ChirpQuery) -> Result<Vec<Chirp>, StoreError> {
        let tables = self.tables.read().await;
        let mut chirps: Vec<Chirp> = tables
            .chirps
            .values()
            .filter(|c| query.author_id.is_none_or(|author| c.user_id == author))
            .cloned()
            .collect();
        chirps.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        if query.sort == ChirpSort::Desc {
            chirps.reverse();
        }
        Ok(chirps)
    }

    async fn get_chirp(&self, chirp_id: &Uuid) -> Result<Option<Chirp>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.chirps.get(chirp_id).cloned())
    }

    async fn delete_chirp(&self, chirp_id: &Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.chirps.remove(chirp_id).is_some())
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn insert_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&record.user_id) {
            return Err(StoreError::UnknownUser(record.user_id));
        }
        if tables.refresh_tokens.contains_key(&record.token) {
            return Err(StoreError::Conflict("refresh token already exists".into()));
        }
        tables
            .refresh_tokens
            .insert(record.token.clone(), record.clone());
        Ok(())
    }

    async fn find_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.refresh_tokens.get(token).cloned())
    }

    async fn revoke_refresh_token(
        &self,
        token: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(record) = tables.refresh_tokens.get_mut(token)
            && record.revoked_at.is_none()
        {
            record.revoked_at = Some(at);
            record.updated_at = at;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn record(token: &str, user_id: Uuid) -> RefreshTokenRecord {
        let now = Utc::now();
        RefreshTokenRecord {
            token: token.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(60),
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store.create_user("a@example.com", "h").await.unwrap();
        let err = store.create_user("a@example.com", "h2").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_to_own_email_is_allowed() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com", "h").await.unwrap();
        let updated = store
            .update_user(&user.id, "a@example.com", "h2")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(updated.email, "a@example.com");
        let found = store.find_user_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.hashed_password, "h2");
    }

    #[tokio::test]
    async fn list_chirps_filters_and_sorts() {
        let store = MemoryStore::new();
        let a = store.create_user("a@example.com", "h").await.unwrap().id;
        let b = store.create_user("b@example.com", "h").await.unwrap().id;
        let first = store.create_chirp(&a, "one").await.unwrap();
        store.create_chirp(&b, "two").await.unwrap();
        let third = store.create_chirp(&a, "three").await.unwrap();

        let asc = store
            .list_chirps(ChirpQuery {
                author_id: Some(a),
                sort: ChirpSort::Asc,
            })
            .await
            .unwrap();
        assert_eq!(
            asc.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![first.id, third.id]
        );

        let desc = store
            .list_chirps(ChirpQuery {
                author_id: None,
                sort: ChirpSort::Desc,
            })
            .await
            .unwrap();
        assert_eq!(desc.len(), 3);
        assert_eq!(desc[0].id, third.id);
    }

    #[tokio::test]
    async fn revoke_keeps_first_timestamp() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com", "h").await.unwrap();
        store
            .insert_refresh_token(&record("tok", user.id))
            .await
            .unwrap();

        let first = Utc::now() - Duration::minutes(5);
        store.revoke_refresh_token("tok", first).await.unwrap();
        store.revoke_refresh_token("tok", Utc::now()).await.unwrap();
        store.revoke_refresh_token("unknown", Utc::now()).await.unwrap();

        let found = store.find_refresh_token("tok").await.unwrap().unwrap();
        assert_eq!(found.revoked_at, Some(first));
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com", "h").await.unwrap();
        store.create_chirp(&user.id, "hi").await.unwrap();
        store
            .insert_refresh_token(&record("tok", user.id))
            .await
            .unwrap();

        store.reset_users().await.unwrap();

        assert!(store.get_user(&user.id).await.unwrap().is_none());
        assert!(store.list_chirps(ChirpQuery::default()).await.unwrap().is_empty());
        assert!(store.find_refresh_token("tok").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_for_unknown_users_are_rejected() {
        let store = MemoryStore::new();
        let ghost = Uuid::new_v4();

        let err = store.create_chirp(&ghost, "hi").await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(id) if id == ghost));

        let err = store
            .insert_refresh_token(&record("tok", ghost))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(id) if id == ghost));

        assert!(store.list_chirps(ChirpQuery::default()).await.unwrap().is_empty());
        assert!(store.find_refresh_token("tok").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn chirps_cannot_be_created_after_reset() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com", "h").await.unwrap();
        store.reset_users().await.unwrap();

        let err = store.create_chirp(&user.id, "orphan").await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(_)));
    }
}
