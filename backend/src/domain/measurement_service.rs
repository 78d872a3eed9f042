//! Measurement CRUD service and the filtered, paginated listing.
//!
//! Writes check that the referenced series exists before touching the
//! measurement store. The listing resolves its filter against the series
//! store and the clock, then asks the measurement store for one page.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{
    CreateMeasurementRequest, MeasurementCommand, MeasurementQuery, MeasurementRepository,
    SeriesRepository,
};
use crate::domain::repository_errors::{
    map_measurement_repository_error, map_series_repository_error, unknown_series_error,
};
use crate::domain::{
    AuditTrail, Error, Measurement, MeasurementDraft, MeasurementFilter, MeasurementId,
    MeasurementWindow, SeriesId,
};

/// Measurement service implementing [`MeasurementCommand`] and
/// [`MeasurementQuery`].
#[derive(Clone)]
pub struct MeasurementService<M, S> {
    measurements: Arc<M>,
    series: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<M, S> MeasurementService<M, S> {
    /// Create a service over the measurement and series stores.
    pub fn new(measurements: Arc<M>, series: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            measurements,
            series,
            clock,
        }
    }
}

impl<M, S> MeasurementService<M, S>
where
    M: MeasurementRepository,
    S: SeriesRepository,
{
    async fn ensure_series_exists(&self, series_id: SeriesId) -> Result<(), Error> {
        self.series
            .find_by_id(&series_id)
            .await
            .map_err(map_series_repository_error)?
            .map(|_| ())
            .ok_or_else(|| unknown_series_error(series_id))
    }

    /// Resolve the filter into a concrete window.
    ///
    /// No identifiers means every stored series; otherwise only the stored
    /// ones among those given.
    async fn resolve_window(&self, filter: &MeasurementFilter) -> Result<MeasurementWindow, Error> {
        let (from, to) = filter.resolve_range(self.clock.utc());
        let lookup = if filter.series_ids.is_empty() {
            self.series.list_all().await
        } else {
            self.series.find_all_by_id(&filter.series_ids).await
        };
        let series = lookup.map_err(map_series_repository_error)?;

        Ok(MeasurementWindow::new(
            series.into_iter().map(|series| series.id),
            from,
            to,
        ))
    }
}

#[async_trait]
impl<M, S> MeasurementCommand for MeasurementService<M, S>
where
    M: MeasurementRepository,
    S: SeriesRepository,
{
    async fn create(&self, request: CreateMeasurementRequest) -> Result<Measurement, Error> {
        self.ensure_series_exists(request.draft.series_id()).await?;
        let audit = AuditTrail::created(request.created_by.as_deref(), self.clock.utc());
        self.measurements
            .create(&request.draft, &audit)
            .await
            .map_err(map_measurement_repository_error)
    }

    async fn update(
        &self,
        id: MeasurementId,
        draft: MeasurementDraft,
    ) -> Result<Measurement, Error> {
        let not_found = || Error::not_found(format!("measurement {id} not found"));

        self.measurements
            .find_by_id(&id)
            .await
            .map_err(map_measurement_repository_error)?
            .ok_or_else(not_found)?;
        self.ensure_series_exists(draft.series_id()).await?;

        self.measurements
            .update(&id, &draft, self.clock.utc())
            .await
            .map_err(map_measurement_repository_error)?
            .ok_or_else(not_found)
    }

    async fn delete(&self, id: MeasurementId) -> Result<(), Error> {
        let removed = self
            .measurements
            .delete(&id)
            .await
            .map_err(map_measurement_repository_error)?;
        if !removed {
            debug!(measurement_id = %id, "delete of unknown measurement ignored");
        }
        Ok(())
    }
}

#[async_trait]
impl<M, S> MeasurementQuery for MeasurementService<M, S>
where
    M: MeasurementRepository,
    S: SeriesRepository,
{
    async fn get(&self, id: MeasurementId) -> Result<Measurement, Error> {
        self.measurements
            .find_by_id(&id)
            .await
            .map_err(map_measurement_repository_error)?
            .ok_or_else(|| Error::not_found(format!("measurement {id} not found")))
    }

    async fn query(
        &self,
        filter: MeasurementFilter,
        page: PageRequest,
    ) -> Result<Page<Measurement>, Error> {
        let window = self.resolve_window(&filter).await?;
        if window.selects_nothing() {
            debug!(
                series = window.series_ids().len(),
                from = %window.from(),
                to = %window.to(),
                "measurement window selects nothing"
            );
            return Ok(Page::empty(page));
        }

        self.measurements
            .find_page(&window, page)
            .await
            .map_err(map_measurement_repository_error)
    }
}

#[cfg(test)]
#[path = "measurement_service_tests.rs"]
mod tests;
