//! Series and measurement maps shared by the linked in-memory stores.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Measurement, MeasurementId, Series, SeriesId};

/// Both maps live behind one lock so the series reference is checked and
/// written in the same critical section.
#[derive(Debug, Default)]
pub(super) struct SeriesTables {
    pub(super) series: HashMap<SeriesId, Series>,
    pub(super) measurements: HashMap<MeasurementId, Measurement>,
}

impl SeriesTables {
    pub(super) fn references(&self, series_id: &SeriesId) -> usize {
        self.measurements
            .values()
            .filter(|measurement| measurement.series_id == *series_id)
            .count()
    }
}

pub(super) type SharedTables = Arc<RwLock<SeriesTables>>;
