//! Driving port for series mutations.

use async_trait::async_trait;

use crate::domain::{Error, Series, SeriesDraft, SeriesId};

/// Input for [`SeriesCommand::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSeriesRequest {
    /// Fields of the new series.
    pub draft: SeriesDraft,
    /// Author recorded in the audit trail; defaults to `system`.
    pub created_by: Option<String>,
}

/// Create, replace, and delete series.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesCommand: Send + Sync {
    /// Store a new series.
    async fn create(&self, request: CreateSeriesRequest) -> Result<Series, Error>;

    /// Replace every mutable field of an existing series.
    ///
    /// Fails with `not_found` when `id` is unknown.
    async fn update(&self, id: SeriesId, draft: SeriesDraft) -> Result<Series, Error>;

    /// Delete a series that owns no measurements.
    ///
    /// Deleting an unknown identifier succeeds without effect. A series that
    /// still owns measurements is refused with `conflict`.
    async fn delete(&self, id: SeriesId) -> Result<(), Error>;
}
