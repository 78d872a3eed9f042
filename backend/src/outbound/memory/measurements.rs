//! In-memory `MeasurementRepository`.
//!
//! The store shares its lock with the series store it was obtained from, so a
//! write whose series is missing fails with
//! [`MeasurementRepositoryError::MissingSeries`] just as the foreign key does
//! in PostgreSQL. The listing filters and sorts a snapshot taken under the
//! read lock, so the count and the page always describe the same state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use super::tables::{SeriesTables, SharedTables};
use crate::domain::ports::{MeasurementRepository, MeasurementRepositoryError};
use crate::domain::{
    AuditTrail, Measurement, MeasurementDraft, MeasurementId, MeasurementWindow, SeriesId,
};

/// Measurement store backed by a hash map.
///
/// Obtain one from [`super::InMemorySeriesRepository::measurements`].
#[derive(Debug)]
pub struct InMemoryMeasurementRepository {
    tables: SharedTables,
}

impl InMemoryMeasurementRepository {
    pub(super) fn linked(tables: SharedTables) -> Self {
        Self { tables }
    }
}

fn require_series(
    tables: &SeriesTables,
    draft: &MeasurementDraft,
) -> Result<(), MeasurementRepositoryError> {
    let series_id = draft.series_id();
    if tables.series.contains_key(&series_id) {
        Ok(())
    } else {
        Err(MeasurementRepositoryError::missing_series(series_id))
    }
}

fn ordered(mut measurements: Vec<Measurement>) -> Vec<Measurement> {
    measurements.sort_by_key(Measurement::ordering_key);
    measurements
}

#[async_trait]
impl MeasurementRepository for InMemoryMeasurementRepository {
    async fn create(
        &self,
        draft: &MeasurementDraft,
        audit: &AuditTrail,
    ) -> Result<Measurement, MeasurementRepositoryError> {
        let mut tables = self.tables.write().await;
        require_series(&tables, draft)?;
        let measurement = Measurement::from_draft(MeasurementId::random(), draft, audit.clone());
        tables
            .measurements
            .insert(measurement.id, measurement.clone());
        Ok(measurement)
    }

    async fn find_by_id(
        &self,
        id: &MeasurementId,
    ) -> Result<Option<Measurement>, MeasurementRepositoryError> {
        Ok(self.tables.read().await.measurements.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Measurement>, MeasurementRepositoryError> {
        let tables = self.tables.read().await;
        Ok(ordered(tables.measurements.values().cloned().collect()))
    }

    async fn find_all_by_id(
        &self,
        ids: &[MeasurementId],
    ) -> Result<Vec<Measurement>, MeasurementRepositoryError> {
        let tables = self.tables.read().await;
        let mut found = ordered(
            ids.iter()
                .filter_map(|id| tables.measurements.get(id).cloned())
                .collect(),
        );
        found.dedup_by_key(|measurement| measurement.id);
        Ok(found)
    }

    async fn update(
        &self,
        id: &MeasurementId,
        draft: &MeasurementDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Measurement>, MeasurementRepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.measurements.contains_key(id) {
            return Ok(None);
        }
        require_series(&tables, draft)?;
        Ok(tables.measurements.get_mut(id).map(|stored| {
            *stored = stored.replaced(draft, now);
            stored.clone()
        }))
    }

    async fn delete(&self, id: &MeasurementId) -> Result<bool, MeasurementRepositoryError> {
        Ok(self.tables.write().await.measurements.remove(id).is_some())
    }

    async fn count_for_series(
        &self,
        series_id: &SeriesId,
    ) -> Result<u64, MeasurementRepositoryError> {
        let count = self.tables.read().await.references(series_id);
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_page(
        &self,
        window: &MeasurementWindow,
        page: PageRequest,
    ) -> Result<Page<Measurement>, MeasurementRepositoryError> {
        if window.selects_nothing() {
            return Ok(Page::empty(page));
        }
        let tables = self.tables.read().await;
        let matching = tables
            .measurements
            .values()
            .filter(|measurement| window.contains(measurement))
            .cloned()
            .collect();
        Ok(Page::from_ordered(ordered(matching), page))
    }
}
