//! Tests for the measurement service and its query resolution.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MeasurementRepositoryError, MockMeasurementRepository, MockSeriesRepository,
};
use crate::domain::{ErrorCode, Series, SeriesDraft};

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 18, 30, 0)
        .single()
        .expect("valid instant")
}

fn clock_at(now: DateTime<Utc>) -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

fn series(now: DateTime<Utc>) -> Series {
    Series::from_draft(
        SeriesId::random(),
        &SeriesDraft::try_new("Tank level", "#00aa88", 0.0, 2.0).expect("draft"),
        AuditTrail::created(None, now),
    )
}

fn measurement(series_id: SeriesId, value: f64, timestamp: DateTime<Utc>) -> Measurement {
    Measurement::from_draft(
        MeasurementId::random(),
        &MeasurementDraft::try_new(series_id, value, timestamp).expect("draft"),
        AuditTrail::created(None, timestamp),
    )
}

fn service(
    measurements: MockMeasurementRepository,
    series: MockSeriesRepository,
    now: DateTime<Utc>,
) -> MeasurementService<MockMeasurementRepository, MockSeriesRepository> {
    MeasurementService::new(Arc::new(measurements), Arc::new(series), clock_at(now))
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_series_without_writing(now: DateTime<Utc>) {
    let mut series_repo = MockSeriesRepository::new();
    series_repo.expect_find_by_id().return_once(|_| Ok(None));
    let mut measurements = MockMeasurementRepository::new();
    measurements.expect_create().times(0);

    let draft = MeasurementDraft::try_new(SeriesId::random(), 1.0, now).expect("draft");
    let error = service(measurements, series_repo, now)
        .create(CreateMeasurementRequest {
            draft,
            created_by: None,
        })
        .await
        .expect_err("unknown series");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["code"], "unknown_series");
}

#[rstest]
#[tokio::test]
async fn create_defaults_author_to_system(now: DateTime<Utc>) {
    let owner = series(now);
    let owner_id = owner.id;
    let mut series_repo = MockSeriesRepository::new();
    series_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(owner)));
    let mut measurements = MockMeasurementRepository::new();
    measurements
        .expect_create()
        .withf(move |_, audit| audit.created_by() == "system" && audit.created_at() == now)
        .times(1)
        .returning(|draft, audit| {
            Ok(Measurement::from_draft(MeasurementId::random(), draft, audit.clone()))
        });

    let draft = MeasurementDraft::try_new(owner_id, 3.5, now).expect("draft");
    let created = service(measurements, series_repo, now)
        .create(CreateMeasurementRequest {
            draft,
            created_by: None,
        })
        .await
        .expect("create succeeds");

    assert_eq!(created.series_id, owner_id);
    assert_eq!(created.value, 3.5);
}

#[rstest]
#[tokio::test]
async fn create_maps_foreign_key_backstop_to_invalid_request(now: DateTime<Utc>) {
    let owner = series(now);
    let owner_id = owner.id;
    let mut series_repo = MockSeriesRepository::new();
    series_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(owner)));
    let mut measurements = MockMeasurementRepository::new();
    measurements
        .expect_create()
        .return_once(move |_, _| Err(MeasurementRepositoryError::missing_series(owner_id)));

    let draft = MeasurementDraft::try_new(owner_id, 1.0, now).expect("draft");
    let error = service(measurements, series_repo, now)
        .create(CreateMeasurementRequest {
            draft,
            created_by: None,
        })
        .await
        .expect_err("series deleted concurrently");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_of_unknown_measurement_is_not_found_and_writes_nothing(now: DateTime<Utc>) {
    let mut measurements = MockMeasurementRepository::new();
    measurements.expect_find_by_id().return_once(|_| Ok(None));
    measurements.expect_update().times(0);
    let mut series_repo = MockSeriesRepository::new();
    series_repo.expect_find_by_id().times(0);

    let draft = MeasurementDraft::try_new(SeriesId::random(), 1.0, now).expect("draft");
    let error = service(measurements, series_repo, now)
        .update(MeasurementId::random(), draft)
        .await
        .expect_err("unknown measurement");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_to_unknown_series_is_rejected(now: DateTime<Utc>) {
    let existing = measurement(SeriesId::random(), 1.0, now);
    let id = existing.id;
    let mut measurements = MockMeasurementRepository::new();
    measurements
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    measurements.expect_update().times(0);
    let mut series_repo = MockSeriesRepository::new();
    series_repo.expect_find_by_id().return_once(|_| Ok(None));

    let draft = MeasurementDraft::try_new(SeriesId::random(), 2.0, now).expect("draft");
    let error = service(measurements, series_repo, now)
        .update(id, draft)
        .await
        .expect_err("unknown target series");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_replaces_fields_at_clock_time(now: DateTime<Utc>) {
    let owner = series(now);
    let owner_id = owner.id;
    let existing = measurement(owner_id, 1.0, now - Duration::days(1));
    let id = existing.id;
    let mut measurements = MockMeasurementRepository::new();
    let stored = existing.clone();
    measurements
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    measurements
        .expect_update()
        .withf(move |candidate, _, at| *candidate == id && *at == now)
        .times(1)
        .return_once(move |_, draft, at| Ok(Some(existing.replaced(draft, at))));
    let mut series_repo = MockSeriesRepository::new();
    series_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(owner)));

    let draft = MeasurementDraft::try_new(owner_id, 9.25, now - Duration::hours(2)).expect("draft");
    let updated = service(measurements, series_repo, now)
        .update(id, draft)
        .await
        .expect("update succeeds");

    assert_eq!(updated.value, 9.25);
    assert_eq!(updated.timestamp, now - Duration::hours(2));
    assert_eq!(updated.audit.updated_at(), now);
}

#[rstest]
#[tokio::test]
async fn query_without_series_uses_every_stored_series_and_clock_bound(now: DateTime<Utc>) {
    let first = series(now);
    let second = series(now);
    let expected_ids = {
        let mut ids = vec![first.id, second.id];
        ids.sort();
        ids
    };
    let mut series_repo = MockSeriesRepository::new();
    series_repo
        .expect_list_all()
        .times(1)
        .return_once(move || Ok(vec![first, second]));
    series_repo.expect_find_all_by_id().times(0);
    let mut measurements = MockMeasurementRepository::new();
    measurements
        .expect_find_page()
        .withf(move |window, page| {
            window.series_ids() == expected_ids.as_slice()
                && window.from() == DateTime::<Utc>::UNIX_EPOCH
                && window.to() == now
                && *page == PageRequest::default()
        })
        .times(1)
        .return_once(|_, page| Ok(Page::empty(page)));

    service(measurements, series_repo, now)
        .query(MeasurementFilter::default(), PageRequest::default())
        .await
        .expect("query succeeds");
}

#[rstest]
#[tokio::test]
async fn query_with_only_unknown_series_skips_measurement_store(now: DateTime<Utc>) {
    let mut series_repo = MockSeriesRepository::new();
    series_repo
        .expect_find_all_by_id()
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let mut measurements = MockMeasurementRepository::new();
    measurements.expect_find_page().times(0);

    let page = service(measurements, series_repo, now)
        .query(
            MeasurementFilter {
                series_ids: vec![SeriesId::random()],
                ..MeasurementFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .expect("query succeeds");

    assert!(page.is_empty());
    assert_eq!(page.total_elements(), 0);
}

#[rstest]
#[tokio::test]
async fn query_with_inverted_range_is_empty(now: DateTime<Utc>) {
    let owner = series(now);
    let mut series_repo = MockSeriesRepository::new();
    series_repo
        .expect_list_all()
        .return_once(move || Ok(vec![owner]));
    let mut measurements = MockMeasurementRepository::new();
    measurements.expect_find_page().times(0);

    let page = service(measurements, series_repo, now)
        .query(
            MeasurementFilter {
                series_ids: Vec::new(),
                from: Some(now),
                to: Some(now - Duration::hours(1)),
            },
            PageRequest::default(),
        )
        .await
        .expect("query succeeds");

    assert!(page.is_empty());
}

#[rstest]
#[tokio::test]
async fn query_propagates_store_outage(now: DateTime<Utc>) {
    let owner = series(now);
    let mut series_repo = MockSeriesRepository::new();
    series_repo
        .expect_list_all()
        .return_once(move || Ok(vec![owner]));
    let mut measurements = MockMeasurementRepository::new();
    measurements
        .expect_find_page()
        .return_once(|_, _| Err(MeasurementRepositoryError::connection("pool exhausted")));

    let error = service(measurements, series_repo, now)
        .query(MeasurementFilter::default(), PageRequest::default())
        .await
        .expect_err("store outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn series_removed_after_the_check_still_blocks_the_write(now: DateTime<Utc>) {
    use crate::outbound::memory::InMemorySeriesRepository;

    // The series check sees a series that the store no longer holds, as when
    // a delete lands between the check and the insert.
    let vanished = series(now);
    let vanished_id = vanished.id;
    let mut series_repo = MockSeriesRepository::new();
    series_repo
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(vanished)));
    let store = InMemorySeriesRepository::default();
    let measurements = Arc::new(store.measurements());
    let service = MeasurementService::new(
        Arc::clone(&measurements),
        Arc::new(series_repo),
        clock_at(now),
    );

    let draft = MeasurementDraft::try_new(vanished_id, 4.0, now).expect("draft");
    let error = service
        .create(CreateMeasurementRequest {
            draft,
            created_by: None,
        })
        .await
        .expect_err("series is gone");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.details().expect("details")["code"], "unknown_series");
    let orphans = measurements
        .count_for_series(&vanished_id)
        .await
        .expect("count");
    assert_eq!(orphans, 0);
}
