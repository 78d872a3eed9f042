//! Port for user persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// Another user already holds the username.
        DuplicateUsername { username: String } =>
            "username {username} is already taken",
    }
}

/// Key-value store of user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its generated identifier.
    async fn create(
        &self,
        draft: &UserDraft,
        now: DateTime<Utc>,
    ) -> Result<User, UserRepositoryError>;

    /// Look up one user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Look up one user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Every stored user, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// The stored users among `ids`; unknown identifiers are skipped.
    async fn find_all_by_id(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError>;

    /// Replace username, password, and role and set `updated_at` to `now`.
    ///
    /// Returns `None`, leaving storage untouched, when `id` is unknown.
    async fn update(
        &self,
        id: &UserId,
        draft: &UserDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Remove a user. Returns whether a record was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;
}
