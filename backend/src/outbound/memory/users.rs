//! In-memory `UserRepository`.
//!
//! Username uniqueness is checked under the write lock, mirroring the unique
//! index of the PostgreSQL table.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserDraft, UserId};

/// User store backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: RwLock<HashMap<UserId, User>>,
}

fn username_taken(records: &HashMap<UserId, User>, username: &str, owner: Option<UserId>) -> bool {
    records
        .values()
        .any(|user| user.username == username && Some(user.id) != owner)
}

fn oldest_first(mut users: Vec<User>) -> Vec<User> {
    users.sort_by_key(|user| (user.created_at, user.id));
    users
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        draft: &UserDraft,
        now: DateTime<Utc>,
    ) -> Result<User, UserRepositoryError> {
        let mut records = self.records.write().await;
        if username_taken(&records, draft.username(), None) {
            return Err(UserRepositoryError::duplicate_username(draft.username()));
        }
        let user = User::from_draft(UserId::random(), draft, now);
        records.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        let records = self.records.read().await;
        Ok(records.values().find(|user| user.username == username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let records = self.records.read().await;
        Ok(oldest_first(records.values().cloned().collect()))
    }

    async fn find_all_by_id(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        let records = self.records.read().await;
        let mut found = oldest_first(ids.iter().filter_map(|id| records.get(id).cloned()).collect());
        found.dedup_by_key(|user| user.id);
        Ok(found)
    }

    async fn update(
        &self,
        id: &UserId,
        draft: &UserDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut records = self.records.write().await;
        if !records.contains_key(id) {
            return Ok(None);
        }
        if username_taken(&records, draft.username(), Some(*id)) {
            return Err(UserRepositoryError::duplicate_username(draft.username()));
        }
        Ok(records.get_mut(id).map(|stored| {
            *stored = stored.replaced(draft, now);
            stored.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}
