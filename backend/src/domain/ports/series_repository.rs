//! Port for series persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AuditTrail, Series, SeriesDraft, SeriesId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by series repository adapters.
    pub enum SeriesRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "series repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "series repository query failed: {message}",
        /// Measurements still reference the series being deleted.
        InUse { series_id: SeriesId } =>
            "series {series_id} is still referenced by measurements",
    }
}

/// Key-value store of series records.
///
/// Adapters assign identifiers on `create`. Callers supply the write instant
/// so that every adapter stamps audit fields from the same clock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesRepository: Send + Sync {
    /// Insert a new series and return it with its generated identifier.
    async fn create(
        &self,
        draft: &SeriesDraft,
        audit: &AuditTrail,
    ) -> Result<Series, SeriesRepositoryError>;

    /// Look up one series.
    async fn find_by_id(&self, id: &SeriesId) -> Result<Option<Series>, SeriesRepositoryError>;

    /// Every stored series, oldest first.
    async fn list_all(&self) -> Result<Vec<Series>, SeriesRepositoryError>;

    /// The stored series among `ids`; unknown identifiers are skipped.
    async fn find_all_by_id(&self, ids: &[SeriesId]) -> Result<Vec<Series>, SeriesRepositoryError>;

    /// Replace every mutable field and set `updated_at` to `now`.
    ///
    /// Returns `None`, leaving storage untouched, when `id` is unknown.
    async fn update(
        &self,
        id: &SeriesId,
        draft: &SeriesDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Series>, SeriesRepositoryError>;

    /// Remove a series. Returns whether a record was removed.
    async fn delete(&self, id: &SeriesId) -> Result<bool, SeriesRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn in_use_error_names_the_series() {
        let id = SeriesId::from_uuid(Uuid::nil());
        assert_eq!(
            SeriesRepositoryError::in_use(id).to_string(),
            "series 00000000-0000-0000-0000-000000000000 is still referenced by measurements"
        );
    }
}
