//! User records: username, credential, and role tag.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::entity_id::define_entity_id;

define_entity_id! {
    /// Store-assigned identifier of a [`User`].
    UserId
}

/// Validation errors raised by [`UserDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The username was blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The username carried leading or trailing whitespace.
    #[error("username must not start or end with whitespace")]
    UntrimmedUsername,
    /// The role tag was blank.
    #[error("role must not be empty")]
    EmptyRole,
}

/// Stored credential.
///
/// Kept exactly as supplied; hashing is not applied. `Debug` never prints
/// the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a credential value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw credential for persistence adapters.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Mutable fields of a user, as supplied on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    username: String,
    password: Credential,
    role: String,
}

impl UserDraft {
    /// Validate the supplied fields.
    ///
    /// # Examples
    /// ```
    /// use measurement_backend::domain::{UserDraft, UserValidationError};
    ///
    /// assert!(UserDraft::try_new("ada", "secret", "admin").is_ok());
    /// assert_eq!(
    ///     UserDraft::try_new(" ada", "secret", "admin"),
    ///     Err(UserValidationError::UntrimmedUsername)
    /// );
    /// ```
    pub fn try_new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        let role = role.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.trim() != username {
            return Err(UserValidationError::UntrimmedUsername);
        }
        if role.trim().is_empty() {
            return Err(UserValidationError::EmptyRole);
        }
        Ok(Self {
            username,
            password: Credential::new(password),
            role,
        })
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Credential.
    pub fn password(&self) -> &Credential {
        &self.password
    }

    /// Role tag.
    pub fn role(&self) -> &str {
        &self.role
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Login name, unique across users.
    pub username: String,
    /// Credential as supplied.
    pub password: Credential,
    /// Role tag.
    pub role: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last write instant.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a newly created user.
    pub fn from_draft(id: UserId, draft: &UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: draft.username.clone(),
            password: draft.password.clone(),
            role: draft.role.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite username, password, and role and refresh `updated_at`.
    pub fn replaced(&self, draft: &UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            created_at: self.created_at,
            ..Self::from_draft(self.id, draft, now)
        }
    }
}
