//! Driving port for series reads.

use async_trait::async_trait;

use crate::domain::{Error, Series, SeriesId};

/// Read access to stored series.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesQuery: Send + Sync {
    /// Fetch one series, failing with `not_found` when absent.
    async fn get(&self, id: SeriesId) -> Result<Series, Error>;

    /// Every series, oldest first.
    async fn list(&self) -> Result<Vec<Series>, Error>;
}
