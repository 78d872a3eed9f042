//! Series: a named, coloured grouping of measurements.

use crate::domain::AuditTrail;
use crate::domain::entity_id::define_entity_id;

define_entity_id! {
    /// Store-assigned identifier of a [`Series`].
    SeriesId
}

/// Validation errors raised by [`SeriesDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesValidationError {
    /// The name was blank.
    #[error("series name must not be empty")]
    EmptyName,
}

/// Mutable fields of a series, as supplied on create and update.
///
/// The declared range is informational. Measurement values are not checked
/// against it.
///
/// # Examples
/// ```
/// use measurement_backend::domain::SeriesDraft;
///
/// let draft = SeriesDraft::try_new("Boiler temperature", "#ff8800", 10.0, 95.0)
///     .expect("valid draft");
/// assert_eq!(draft.name(), "Boiler temperature");
/// assert!(SeriesDraft::try_new("  ", "#000000", 0.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDraft {
    name: String,
    color: String,
    min_value: f64,
    max_value: f64,
}

impl SeriesDraft {
    /// Validate the supplied fields.
    pub fn try_new(
        name: impl Into<String>,
        color: impl Into<String>,
        min_value: f64,
        max_value: f64,
    ) -> Result<Self, SeriesValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SeriesValidationError::EmptyName);
        }
        Ok(Self {
            name,
            color: color.into(),
            min_value,
            max_value,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display colour hint.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Lower bound of the declared range.
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Upper bound of the declared range.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }
}

/// A stored series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Store-assigned identifier.
    pub id: SeriesId,
    /// Display name.
    pub name: String,
    /// Display colour hint.
    pub color: String,
    /// Lower bound of the declared range.
    pub min_value: f64,
    /// Upper bound of the declared range.
    pub max_value: f64,
    /// Authorship and write timestamps.
    pub audit: AuditTrail,
}

impl Series {
    /// Assemble a stored series from its identifier, fields, and audit trail.
    pub fn from_draft(id: SeriesId, draft: &SeriesDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            color: draft.color.clone(),
            min_value: draft.min_value,
            max_value: draft.max_value,
            audit,
        }
    }

    /// Overwrite every mutable field from `draft` and refresh `updated_at`.
    ///
    /// Authorship and creation time are kept.
    pub fn replaced(&self, draft: &SeriesDraft, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self::from_draft(self.id, draft, self.audit.touched(now))
    }
}
