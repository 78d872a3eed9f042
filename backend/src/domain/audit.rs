//! Audit fields stamped on every stored series and measurement.

use chrono::{DateTime, Utc};

/// Author recorded when a write carries no caller identity.
pub const DEFAULT_CREATED_BY: &str = "system";

/// Who created a record and when it was created and last written.
///
/// ## Invariants
/// - `created_by` is never blank.
/// - `updated_at >= created_at` for records written through the facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTrail {
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AuditTrail {
    /// Audit fields for a record created at `now`.
    ///
    /// A missing or blank author falls back to [`DEFAULT_CREATED_BY`].
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use measurement_backend::domain::{AuditTrail, DEFAULT_CREATED_BY};
    ///
    /// let audit = AuditTrail::created(Some("   "), Utc::now());
    /// assert_eq!(audit.created_by(), DEFAULT_CREATED_BY);
    /// assert_eq!(audit.created_at(), audit.updated_at());
    /// ```
    #[must_use]
    pub fn created(created_by: Option<&str>, now: DateTime<Utc>) -> Self {
        let created_by = created_by
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .unwrap_or(DEFAULT_CREATED_BY)
            .to_owned();
        Self {
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild audit fields read back from storage.
    #[must_use]
    pub fn restore(
        created_by: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            created_by,
            created_at,
            updated_at,
        }
    }

    /// Copy of these fields with `updated_at` moved to `now`.
    #[must_use]
    pub fn touched(&self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now,
            ..self.clone()
        }
    }

    /// Author of the record.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Creation instant.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last write instant.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
