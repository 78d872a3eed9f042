//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read access to stored users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch one user by identifier, failing with `not_found` when absent.
    async fn get(&self, id: UserId) -> Result<User, Error>;

    /// Fetch one user by exact username, failing with `not_found` when absent.
    async fn find_by_username(&self, username: &str) -> Result<User, Error>;
}
