//! In-memory `SeriesRepository`.
//!
//! Deleting a series that measurements still reference fails with
//! [`SeriesRepositoryError::InUse`], mirroring `ON DELETE RESTRICT`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::measurements::InMemoryMeasurementRepository;
use super::tables::SharedTables;
use crate::domain::ports::{SeriesRepository, SeriesRepositoryError};
use crate::domain::{AuditTrail, Series, SeriesDraft, SeriesId};

/// Series store backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemorySeriesRepository {
    tables: SharedTables,
}

impl InMemorySeriesRepository {
    /// Measurement store whose series references resolve against this store.
    ///
    /// # Examples
    /// ```
    /// use measurement_backend::outbound::memory::InMemorySeriesRepository;
    ///
    /// let series = InMemorySeriesRepository::default();
    /// let _measurements = series.measurements();
    /// ```
    #[must_use]
    pub fn measurements(&self) -> InMemoryMeasurementRepository {
        InMemoryMeasurementRepository::linked(Arc::clone(&self.tables))
    }
}

fn oldest_first(mut series: Vec<Series>) -> Vec<Series> {
    series.sort_by_key(|series| (series.audit.created_at(), series.id));
    series
}

#[async_trait]
impl SeriesRepository for InMemorySeriesRepository {
    async fn create(
        &self,
        draft: &SeriesDraft,
        audit: &AuditTrail,
    ) -> Result<Series, SeriesRepositoryError> {
        let series = Series::from_draft(SeriesId::random(), draft, audit.clone());
        self.tables
            .write()
            .await
            .series
            .insert(series.id, series.clone());
        Ok(series)
    }

    async fn find_by_id(&self, id: &SeriesId) -> Result<Option<Series>, SeriesRepositoryError> {
        Ok(self.tables.read().await.series.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Series>, SeriesRepositoryError> {
        let tables = self.tables.read().await;
        Ok(oldest_first(tables.series.values().cloned().collect()))
    }

    async fn find_all_by_id(&self, ids: &[SeriesId]) -> Result<Vec<Series>, SeriesRepositoryError> {
        let tables = self.tables.read().await;
        let mut found =
            oldest_first(ids.iter().filter_map(|id| tables.series.get(id).cloned()).collect());
        found.dedup_by_key(|series| series.id);
        Ok(found)
    }

    async fn update(
        &self,
        id: &SeriesId,
        draft: &SeriesDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Series>, SeriesRepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.series.get_mut(id).map(|stored| {
            *stored = stored.replaced(draft, now);
            stored.clone()
        }))
    }

    async fn delete(&self, id: &SeriesId) -> Result<bool, SeriesRepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.references(id) > 0 {
            return Err(SeriesRepositoryError::in_use(*id));
        }
        Ok(tables.series.remove(id).is_some())
    }
}
