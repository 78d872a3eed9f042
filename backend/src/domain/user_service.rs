//! User CRUD service.
//!
//! Usernames are unique. The service checks before writing and the store's
//! unique index catches the race between two concurrent writers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{UserCommand, UserQuery, UserRepository};
use crate::domain::repository_errors::{duplicate_username_error, map_user_repository_error};
use crate::domain::{Error, User, UserDraft, UserId};

/// User service implementing [`UserCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct UserService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> UserService<U> {
    /// Create a service over the user store.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    /// Fail when `username` belongs to a user other than `owner`.
    async fn ensure_username_free(
        &self,
        username: &str,
        owner: Option<UserId>,
    ) -> Result<(), Error> {
        let holder = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_repository_error)?;
        match holder {
            Some(user) if Some(user.id) != owner => Err(duplicate_username_error(username)),
            _ => Ok(()),
        }
    }
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

#[async_trait]
impl<U> UserCommand for UserService<U>
where
    U: UserRepository,
{
    async fn create(&self, draft: UserDraft) -> Result<User, Error> {
        self.ensure_username_free(draft.username(), None).await?;
        self.users
            .create(&draft, self.clock.utc())
            .await
            .map_err(map_user_repository_error)
    }

    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        let known = self
            .users
            .find_by_id(&id)
            .await
            .map_err(map_user_repository_error)?
            .is_some();
        if !known {
            return Err(user_not_found(id));
        }
        self.ensure_username_free(draft.username(), Some(id)).await?;
        self.users
            .update(&id, &draft, self.clock.utc())
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .users
            .delete(&id)
            .await
            .map_err(map_user_repository_error)?;
        if !removed {
            debug!(user_id = %id, "delete of unknown user ignored");
        }
        Ok(())
    }
}

#[async_trait]
impl<U> UserQuery for UserService<U>
where
    U: UserRepository,
{
    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(&id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn find_by_username(&self, username: &str) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {username} not found")))
    }
}
