//! Port for measurement persistence and the windowed, paginated read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{
    AuditTrail, Measurement, MeasurementDraft, MeasurementId, MeasurementWindow, SeriesId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by measurement repository adapters.
    pub enum MeasurementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "measurement repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "measurement repository query failed: {message}",
        /// The referenced series does not exist.
        MissingSeries { series_id: SeriesId } =>
            "series {series_id} does not exist",
    }
}

/// Key-value store of measurement records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Insert a new measurement and return it with its generated identifier.
    async fn create(
        &self,
        draft: &MeasurementDraft,
        audit: &AuditTrail,
    ) -> Result<Measurement, MeasurementRepositoryError>;

    /// Look up one measurement.
    async fn find_by_id(
        &self,
        id: &MeasurementId,
    ) -> Result<Option<Measurement>, MeasurementRepositoryError>;

    /// Every stored measurement, ordered by timestamp then identifier.
    async fn list_all(&self) -> Result<Vec<Measurement>, MeasurementRepositoryError>;

    /// The stored measurements among `ids`; unknown identifiers are skipped.
    async fn find_all_by_id(
        &self,
        ids: &[MeasurementId],
    ) -> Result<Vec<Measurement>, MeasurementRepositoryError>;

    /// Replace value, timestamp, and series reference and set `updated_at`.
    ///
    /// Returns `None`, leaving storage untouched, when `id` is unknown.
    async fn update(
        &self,
        id: &MeasurementId,
        draft: &MeasurementDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Measurement>, MeasurementRepositoryError>;

    /// Remove a measurement. Returns whether a record was removed.
    async fn delete(&self, id: &MeasurementId) -> Result<bool, MeasurementRepositoryError>;

    /// Number of measurements owned by `series_id`.
    async fn count_for_series(&self, series_id: &SeriesId)
    -> Result<u64, MeasurementRepositoryError>;

    /// One page of the measurements inside `window`.
    ///
    /// Content is ordered by timestamp ascending with identifier as the
    /// tie-breaker. Totals describe the whole window, not just the page.
    async fn find_page(
        &self,
        window: &MeasurementWindow,
        page: PageRequest,
    ) -> Result<Page<Measurement>, MeasurementRepositoryError>;
}
