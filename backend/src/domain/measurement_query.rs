//! Filter resolution for the measurement listing.
//!
//! A caller supplies a [`MeasurementFilter`] with every part optional. The
//! query service resolves it against the series store and the clock into a
//! [`MeasurementWindow`], which is what stores actually evaluate.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::{Measurement, SeriesId};

/// Caller-supplied measurement filter.
///
/// - An empty `series_ids` means every series.
/// - A missing `from` means the Unix epoch.
/// - A missing `to` means the instant the query runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementFilter {
    /// Series to include; unknown identifiers are ignored.
    pub series_ids: Vec<SeriesId>,
    /// Inclusive lower bound on `timestamp`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `timestamp`.
    pub to: Option<DateTime<Utc>>,
}

impl MeasurementFilter {
    /// Apply the time-range defaults relative to `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{DateTime, Utc};
    /// use measurement_backend::domain::MeasurementFilter;
    ///
    /// let now = Utc::now();
    /// let (from, to) = MeasurementFilter::default().resolve_range(now);
    /// assert_eq!(from, DateTime::<Utc>::UNIX_EPOCH);
    /// assert_eq!(to, now);
    /// ```
    pub fn resolve_range(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            self.from.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            self.to.unwrap_or(now),
        )
    }
}

/// Fully resolved selection: a concrete series set and a closed time range.
///
/// ## Invariants
/// - `series_ids` is sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementWindow {
    series_ids: Vec<SeriesId>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl MeasurementWindow {
    /// Build a window over `series_ids` and `[from, to]`.
    pub fn new(
        series_ids: impl IntoIterator<Item = SeriesId>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Self {
        let series_ids = series_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            series_ids,
            from,
            to,
        }
    }

    /// Series in scope, ascending.
    pub fn series_ids(&self) -> &[SeriesId] {
        &self.series_ids
    }

    /// Inclusive lower bound.
    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Inclusive upper bound.
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// True when nothing can match: no series, or an inverted range.
    pub fn selects_nothing(&self) -> bool {
        self.series_ids.is_empty() || self.from > self.to
    }

    /// Whether `measurement` falls inside the window.
    pub fn contains(&self, measurement: &Measurement) -> bool {
        self.series_ids.binary_search(&measurement.series_id).is_ok()
            && self.from <= measurement.timestamp
            && measurement.timestamp <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuditTrail, MeasurementDraft, MeasurementId};
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 8, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn sample(series_id: SeriesId, timestamp: DateTime<Utc>) -> Measurement {
        Measurement::from_draft(
            MeasurementId::random(),
            &MeasurementDraft::try_new(series_id, 1.0, timestamp).expect("draft"),
            AuditTrail::created(None, timestamp),
        )
    }

    #[rstest]
    fn explicit_bounds_override_defaults(t0: DateTime<Utc>) {
        let filter = MeasurementFilter {
            series_ids: Vec::new(),
            from: Some(t0),
            to: Some(t0 + Duration::hours(1)),
        };
        assert_eq!(
            filter.resolve_range(t0 + Duration::days(9)),
            (t0, t0 + Duration::hours(1))
        );
    }

    #[rstest]
    fn window_bounds_are_inclusive(t0: DateTime<Utc>) {
        let series = SeriesId::random();
        let window = MeasurementWindow::new([series], t0, t0 + Duration::hours(1));
        assert!(window.contains(&sample(series, t0)));
        assert!(window.contains(&sample(series, t0 + Duration::hours(1))));
        assert!(!window.contains(&sample(series, t0 - Duration::nanoseconds(1))));
        assert!(!window.contains(&sample(series, t0 + Duration::hours(1) + Duration::seconds(1))));
    }

    #[rstest]
    fn window_excludes_other_series(t0: DateTime<Utc>) {
        let window = MeasurementWindow::new([SeriesId::random()], t0, t0);
        assert!(!window.contains(&sample(SeriesId::random(), t0)));
    }

    #[rstest]
    fn duplicate_series_ids_collapse(t0: DateTime<Utc>) {
        let series = SeriesId::random();
        let window = MeasurementWindow::new([series, series], t0, t0);
        assert_eq!(window.series_ids(), &[series]);
    }

    #[rstest]
    #[case(true, 0, true)]
    #[case(false, -1, true)]
    #[case(false, 0, false)]
    fn selects_nothing_for_empty_or_inverted_windows(
        t0: DateTime<Utc>,
        #[case] no_series: bool,
        #[case] to_offset_hours: i64,
        #[case] expected: bool,
    ) {
        let ids = if no_series { Vec::new() } else { vec![SeriesId::random()] };
        let window = MeasurementWindow::new(ids, t0, t0 + Duration::hours(to_offset_hours));
        assert_eq!(window.selects_nothing(), expected);
    }
}
