//! Driving port for measurement mutations.

use async_trait::async_trait;

use crate::domain::{Error, Measurement, MeasurementDraft, MeasurementId};

/// Input for [`MeasurementCommand::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMeasurementRequest {
    /// Fields of the new measurement.
    pub draft: MeasurementDraft,
    /// Author recorded in the audit trail; defaults to `system`.
    pub created_by: Option<String>,
}

/// Create, replace, and delete measurements.
///
/// Create and update refuse drafts whose series does not exist with an
/// `invalid_request` error carrying `{"field": "seriesId", "code": "unknown_series"}`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeasurementCommand: Send + Sync {
    /// Store a new measurement.
    async fn create(&self, request: CreateMeasurementRequest) -> Result<Measurement, Error>;

    /// Replace value, timestamp, and series of an existing measurement.
    ///
    /// Fails with `not_found` when `id` is unknown.
    async fn update(
        &self,
        id: MeasurementId,
        draft: MeasurementDraft,
    ) -> Result<Measurement, Error>;

    /// Delete a measurement; unknown identifiers succeed without effect.
    async fn delete(&self, id: MeasurementId) -> Result<(), Error>;
}
