//! Driving port for measurement reads, including the filtered listing.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Measurement, MeasurementFilter, MeasurementId};

/// Read access to stored measurements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeasurementQuery: Send + Sync {
    /// Fetch one measurement, failing with `not_found` when absent.
    async fn get(&self, id: MeasurementId) -> Result<Measurement, Error>;

    /// One page of measurements matching `filter`, oldest first.
    ///
    /// Never fails because of the filter itself: unknown series and inverted
    /// ranges produce an empty page.
    async fn query(
        &self,
        filter: MeasurementFilter,
        page: PageRequest,
    ) -> Result<Page<Measurement>, Error>;
}
