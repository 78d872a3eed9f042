//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Create, replace, and delete users.
///
/// Usernames are unique; a clash fails with `conflict`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Store a new user.
    async fn create(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace username, password, and role of an existing user.
    ///
    /// Fails with `not_found` when `id` is unknown.
    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Delete a user; unknown identifiers succeed without effect.
    async fn delete(&self, id: UserId) -> Result<(), Error>;
}
