//! Integration tests for `DieselMeasurementRepository` against embedded
//! PostgreSQL.
//!
//! The windowed read is the part worth running over real SQL: the inclusive
//! `BETWEEN`, the `(timestamp, id)` ordering, limit and offset, and the count
//! taken in the same transaction as the page.

use chrono::{DateTime, Duration, TimeZone, Utc};
use measurement_backend::domain::ports::{
    MeasurementRepository, MeasurementRepositoryError, SeriesRepository,
};
use measurement_backend::domain::{
    AuditTrail, Measurement, MeasurementDraft, MeasurementId, MeasurementWindow, SeriesDraft,
    SeriesId,
};
use measurement_backend::outbound::persistence::{
    DieselMeasurementRepository, DieselSeriesRepository,
};
use pagination::PageRequest;
use rstest::{fixture, rstest};

mod support;

use support::PgHarness;

#[fixture]
fn diesel_world() -> Option<PgHarness> {
    support::harness()
}

#[fixture]
fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid instant")
}

struct Stores {
    series: DieselSeriesRepository,
    measurements: DieselMeasurementRepository,
}

impl Stores {
    fn over(pg: &PgHarness) -> Self {
        Self {
            series: DieselSeriesRepository::new(pg.pool()),
            measurements: DieselMeasurementRepository::new(pg.pool()),
        }
    }

    async fn series(&self, name: &str, now: DateTime<Utc>) -> SeriesId {
        let draft = SeriesDraft::try_new(name, "#008080", 0.0, 10.0).expect("draft");
        self.series
            .create(&draft, &AuditTrail::created(None, now))
            .await
            .expect("create series")
            .id
    }

    async fn record(&self, series_id: SeriesId, value: f64, at: DateTime<Utc>) -> Measurement {
        let draft = MeasurementDraft::try_new(series_id, value, at).expect("draft");
        self.measurements
            .create(&draft, &AuditTrail::created(None, at))
            .await
            .expect("record")
    }
}

fn values(page: &[Measurement]) -> Vec<f64> {
    page.iter().map(|measurement| measurement.value).collect()
}

#[rstest]
fn window_is_inclusive_and_timestamp_ordered(diesel_world: Option<PgHarness>, t0: DateTime<Utc>) {
    let Some(pg) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: window_is_inclusive_and_timestamp_ordered skipped");
        return;
    };
    let stores = Stores::over(&pg);

    pg.run(async {
        let s1 = stores.series("S1", t0).await;
        let s2 = stores.series("S2", t0).await;
        stores.record(s1, 7.1, t0 + Duration::hours(1)).await;
        stores.record(s1, 3.5, t0).await;
        stores.record(s1, 9.9, t0 + Duration::hours(1) + Duration::seconds(1)).await;
        stores.record(s1, 0.5, t0 - Duration::seconds(1)).await;
        stores.record(s2, 4.2, t0).await;

        let window = MeasurementWindow::new([s1], t0, t0 + Duration::hours(1));
        let page = stores
            .measurements
            .find_page(&window, PageRequest::new(0, 10).expect("page request"))
            .await
            .expect("page");

        assert_eq!(values(page.content()), vec![3.5, 7.1]);
        assert_eq!(page.total_elements(), 2);
    });
}

#[rstest]
fn equal_timestamps_fall_back_to_id_order(diesel_world: Option<PgHarness>, t0: DateTime<Utc>) {
    let Some(pg) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: equal_timestamps_fall_back_to_id_order skipped");
        return;
    };
    let stores = Stores::over(&pg);

    pg.run(async {
        let series = stores.series("tied", t0).await;
        let mut expected = Vec::new();
        for value in [1.0, 2.0, 3.0] {
            expected.push(stores.record(series, value, t0).await.id);
        }
        expected.sort();

        let page = stores
            .measurements
            .find_page(
                &MeasurementWindow::new([series], t0, t0),
                PageRequest::default(),
            )
            .await
            .expect("page");

        let ids: Vec<MeasurementId> = page.content().iter().map(|m| m.id).collect();
        assert_eq!(ids, expected);
    });
}

#[rstest]
fn pages_partition_the_ordered_result(diesel_world: Option<PgHarness>, t0: DateTime<Utc>) {
    let Some(pg) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: pages_partition_the_ordered_result skipped");
        return;
    };
    let stores = Stores::over(&pg);

    pg.run(async {
        let a = stores.series("a", t0).await;
        let b = stores.series("b", t0).await;
        for hour in 0..5 {
            let series = if hour % 2 == 0 { a } else { b };
            stores
                .record(series, f64::from(hour), t0 + Duration::hours(i64::from(hour)))
                .await;
        }
        let window = MeasurementWindow::new([a, b], t0, t0 + Duration::days(1));

        let mut collected = Vec::new();
        for number in 0..3 {
            let page = stores
                .measurements
                .find_page(&window, PageRequest::new(number, 2).expect("page request"))
                .await
                .expect("page");
            assert_eq!(page.total_elements(), 5);
            assert_eq!(page.total_pages(), 3);
            collected.extend(values(page.content()));
        }
        let past_end = stores
            .measurements
            .find_page(&window, PageRequest::new(3, 2).expect("page request"))
            .await
            .expect("page past the end");

        assert_eq!(collected, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert!(past_end.content().is_empty());
        assert_eq!(past_end.total_elements(), 5);
    });
}

#[rstest]
fn foreign_key_failures_map_to_missing_series(
    diesel_world: Option<PgHarness>,
    t0: DateTime<Utc>,
) {
    let Some(pg) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: foreign_key_failures_map_to_missing_series skipped");
        return;
    };
    let stores = Stores::over(&pg);

    pg.run(async {
        let kept = stores.series("kept", t0).await;
        let stored = stores.record(kept, 1.0, t0).await;
        let ghost = SeriesId::random();
        let orphan = MeasurementDraft::try_new(ghost, 2.0, t0).expect("draft");

        let created = stores
            .measurements
            .create(&orphan, &AuditTrail::created(None, t0))
            .await;
        let moved = stores.measurements.update(&stored.id, &orphan, t0).await;

        let refused = MeasurementRepositoryError::missing_series(ghost);
        assert_eq!(created, Err(refused.clone()));
        assert_eq!(moved, Err(refused));
        assert_eq!(stores.measurements.count_for_series(&ghost).await, Ok(0));
        assert_eq!(stores.measurements.count_for_series(&kept).await, Ok(1));
    });
}

#[rstest]
fn update_replaces_reading_and_keeps_authorship(
    diesel_world: Option<PgHarness>,
    t0: DateTime<Utc>,
) {
    let Some(pg) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: update_replaces_reading_and_keeps_authorship skipped");
        return;
    };
    let stores = Stores::over(&pg);

    pg.run(async {
        let from = stores.series("from", t0).await;
        let to = stores.series("to", t0).await;
        let stored = stores.record(from, 1.0, t0).await;
        let later = t0 + Duration::minutes(5);
        let replacement = MeasurementDraft::try_new(to, 8.5, later).expect("draft");

        let updated = stores
            .measurements
            .update(&stored.id, &replacement, later)
            .await
            .expect("update")
            .expect("measurement exists");
        let missing = stores
            .measurements
            .update(&MeasurementId::random(), &replacement, later)
            .await;

        assert_eq!(updated.series_id, to);
        assert_eq!(updated.value, 8.5);
        assert_eq!(updated.timestamp, later);
        assert_eq!(updated.audit.created_at(), t0);
        assert_eq!(updated.audit.updated_at(), later);
        assert_eq!(missing, Ok(None));
        assert_eq!(
            stores.measurements.find_by_id(&stored.id).await,
            Ok(Some(updated))
        );
    });
}

#[rstest]
fn missing_table_surfaces_a_query_error(diesel_world: Option<PgHarness>, t0: DateTime<Utc>) {
    let Some(pg) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: missing_table_surfaces_a_query_error skipped");
        return;
    };
    let stores = Stores::over(&pg);
    let series = pg.run(stores.series("doomed", t0));
    pg.execute_sql("DROP TABLE measurements");

    let outcome = pg.run(stores.measurements.find_page(
        &MeasurementWindow::new([series], t0, t0),
        PageRequest::default(),
    ));

    assert!(
        matches!(outcome, Err(MeasurementRepositoryError::Query { .. })),
        "expected a query error, got {outcome:?}"
    );
}
