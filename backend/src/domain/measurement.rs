//! Measurement: one timestamped numeric sample owned by a series.

use chrono::{DateTime, Utc};

use crate::domain::entity_id::define_entity_id;
use crate::domain::{AuditTrail, SeriesId};

define_entity_id! {
    /// Store-assigned identifier of a [`Measurement`].
    MeasurementId
}

/// Validation errors raised by [`MeasurementDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeasurementValidationError {
    /// The value was NaN or infinite.
    #[error("measurement value must be a finite number")]
    NonFiniteValue,
}

/// Mutable fields of a measurement, as supplied on create and update.
///
/// The owning series is referenced by identifier only.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementDraft {
    series_id: SeriesId,
    value: f64,
    timestamp: DateTime<Utc>,
}

impl MeasurementDraft {
    /// Validate the supplied fields.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use measurement_backend::domain::{MeasurementDraft, SeriesId};
    ///
    /// let series = SeriesId::random();
    /// assert!(MeasurementDraft::try_new(series, 3.5, Utc::now()).is_ok());
    /// assert!(MeasurementDraft::try_new(series, f64::NAN, Utc::now()).is_err());
    /// ```
    pub fn try_new(
        series_id: SeriesId,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, MeasurementValidationError> {
        if !value.is_finite() {
            return Err(MeasurementValidationError::NonFiniteValue);
        }
        Ok(Self {
            series_id,
            value,
            timestamp,
        })
    }

    /// Owning series.
    pub fn series_id(&self) -> SeriesId {
        self.series_id
    }

    /// Sampled value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Instant the sample was taken.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A stored measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Store-assigned identifier.
    pub id: MeasurementId,
    /// Owning series.
    pub series_id: SeriesId,
    /// Sampled value.
    pub value: f64,
    /// Instant the sample was taken.
    pub timestamp: DateTime<Utc>,
    /// Authorship and write timestamps.
    pub audit: AuditTrail,
}

impl Measurement {
    /// Assemble a stored measurement from its identifier, fields, and audit trail.
    pub fn from_draft(id: MeasurementId, draft: &MeasurementDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            series_id: draft.series_id,
            value: draft.value,
            timestamp: draft.timestamp,
            audit,
        }
    }

    /// Overwrite value, timestamp, and series reference and refresh `updated_at`.
    pub fn replaced(&self, draft: &MeasurementDraft, now: DateTime<Utc>) -> Self {
        Self::from_draft(self.id, draft, self.audit.touched(now))
    }

    /// Sort key used by every listing: timestamp, then identifier.
    pub fn ordering_key(&self) -> (DateTime<Utc>, MeasurementId) {
        (self.timestamp, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn non_finite_values_are_rejected(#[case] value: f64) {
        assert_eq!(
            MeasurementDraft::try_new(SeriesId::random(), value, Utc::now()),
            Err(MeasurementValidationError::NonFiniteValue)
        );
    }

    #[rstest]
    fn replaced_moves_measurement_to_new_series() {
        let t0 = Utc
            .with_ymd_and_hms(2026, 5, 4, 12, 0, 0)
            .single()
            .expect("valid instant");
        let original = Measurement::from_draft(
            MeasurementId::random(),
            &MeasurementDraft::try_new(SeriesId::random(), 1.0, t0).expect("draft"),
            AuditTrail::created(None, t0),
        );
        let target = SeriesId::random();
        let draft = MeasurementDraft::try_new(target, 2.5, t0 + Duration::minutes(1)).expect("draft");

        let replaced = original.replaced(&draft, t0 + Duration::hours(2));

        assert_eq!(replaced.id, original.id);
        assert_eq!(replaced.series_id, target);
        assert_eq!(replaced.value, 2.5);
        assert_eq!(replaced.timestamp, t0 + Duration::minutes(1));
        assert_eq!(replaced.audit.created_at(), t0);
        assert_eq!(replaced.audit.updated_at(), t0 + Duration::hours(2));
    }
}
