//! Series CRUD service.
//!
//! Implements the series driving ports over the series store. Deletion also
//! consults the measurement store so that a series is never removed while
//! measurements still point at it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    CreateSeriesRequest, MeasurementRepository, SeriesCommand, SeriesQuery, SeriesRepository,
};
use crate::domain::repository_errors::{
    map_measurement_repository_error, map_series_repository_error, series_in_use_error,
};
use crate::domain::{AuditTrail, Error, Series, SeriesDraft, SeriesId};

/// Series service implementing [`SeriesCommand`] and [`SeriesQuery`].
#[derive(Clone)]
pub struct SeriesService<S, M> {
    series: Arc<S>,
    measurements: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<S, M> SeriesService<S, M> {
    /// Create a service over the series and measurement stores.
    pub fn new(series: Arc<S>, measurements: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            series,
            measurements,
            clock,
        }
    }
}

#[async_trait]
impl<S, M> SeriesCommand for SeriesService<S, M>
where
    S: SeriesRepository,
    M: MeasurementRepository,
{
    async fn create(&self, request: CreateSeriesRequest) -> Result<Series, Error> {
        let audit = AuditTrail::created(request.created_by.as_deref(), self.clock.utc());
        self.series
            .create(&request.draft, &audit)
            .await
            .map_err(map_series_repository_error)
    }

    async fn update(&self, id: SeriesId, draft: SeriesDraft) -> Result<Series, Error> {
        self.series
            .update(&id, &draft, self.clock.utc())
            .await
            .map_err(map_series_repository_error)?
            .ok_or_else(|| Error::not_found(format!("series {id} not found")))
    }

    async fn delete(&self, id: SeriesId) -> Result<(), Error> {
        let owned = self
            .measurements
            .count_for_series(&id)
            .await
            .map_err(map_measurement_repository_error)?;
        if owned > 0 {
            return Err(series_in_use_error(id));
        }

        let removed = self
            .series
            .delete(&id)
            .await
            .map_err(map_series_repository_error)?;
        if !removed {
            debug!(series_id = %id, "delete of unknown series ignored");
        }
        Ok(())
    }
}

#[async_trait]
impl<S, M> SeriesQuery for SeriesService<S, M>
where
    S: SeriesRepository,
    M: MeasurementRepository,
{
    async fn get(&self, id: SeriesId) -> Result<Series, Error> {
        self.series
            .find_by_id(&id)
            .await
            .map_err(map_series_repository_error)?
            .ok_or_else(|| Error::not_found(format!("series {id} not found")))
    }

    async fn list(&self) -> Result<Vec<Series>, Error> {
        self.series
            .list_all()
            .await
            .map_err(map_series_repository_error)
    }
}

#[cfg(test)]
#[path = "series_service_tests.rs"]
mod tests;
