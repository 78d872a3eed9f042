//! PostgreSQL-backed `MeasurementRepository`.
//!
//! The windowed listing runs its count and page select inside one
//! transaction so the reported total matches the rows returned.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{MeasurementRepository, MeasurementRepositoryError};
use crate::domain::{
    AuditTrail, Measurement, MeasurementDraft, MeasurementId, MeasurementWindow, SeriesId,
};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{MeasurementChangeset, MeasurementRow, NewMeasurementRow};
use super::pool::{DbPool, PoolError};
use super::schema::measurements;

/// Diesel implementation of the measurement store.
#[derive(Clone)]
pub struct DieselMeasurementRepository {
    pool: DbPool,
}

impl DieselMeasurementRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MeasurementRepositoryError {
    map_basic_pool_error(error, MeasurementRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MeasurementRepositoryError {
    map_basic_diesel_error(
        error,
        MeasurementRepositoryError::query,
        MeasurementRepositoryError::connection,
    )
}

/// Writes that name a series surface a foreign key failure as `MissingSeries`.
fn map_write_error(
    series_id: SeriesId,
) -> impl FnOnce(diesel::result::Error) -> MeasurementRepositoryError {
    move |error| match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey) => {
            MeasurementRepositoryError::missing_series(series_id)
        }
        _ => map_diesel_error(error),
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn rows_to_measurements(rows: Vec<MeasurementRow>) -> Vec<Measurement> {
    rows.into_iter().map(Measurement::from).collect()
}

#[async_trait]
impl MeasurementRepository for DieselMeasurementRepository {
    async fn create(
        &self,
        draft: &MeasurementDraft,
        audit: &AuditTrail,
    ) -> Result<Measurement, MeasurementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMeasurementRow::new(Uuid::new_v4(), draft, audit);

        let stored: MeasurementRow = diesel::insert_into(measurements::table)
            .values(&row)
            .returning(MeasurementRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_write_error(draft.series_id()))?;
        Ok(stored.into())
    }

    async fn find_by_id(
        &self,
        id: &MeasurementId,
    ) -> Result<Option<Measurement>, MeasurementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MeasurementRow> = measurements::table
            .find(id.as_uuid())
            .select(MeasurementRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Measurement::from))
    }

    async fn list_all(&self) -> Result<Vec<Measurement>, MeasurementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MeasurementRow> = measurements::table
            .select(MeasurementRow::as_select())
            .order_by((measurements::timestamp.asc(), measurements::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows_to_measurements(rows))
    }

    async fn find_all_by_id(
        &self,
        ids: &[MeasurementId],
    ) -> Result<Vec<Measurement>, MeasurementRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<MeasurementRow> = measurements::table
            .filter(measurements::id.eq_any(uuids))
            .select(MeasurementRow::as_select())
            .order_by((measurements::timestamp.asc(), measurements::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows_to_measurements(rows))
    }

    async fn update(
        &self,
        id: &MeasurementId,
        draft: &MeasurementDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Measurement>, MeasurementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MeasurementRow> = diesel::update(measurements::table.find(id.as_uuid()))
            .set(MeasurementChangeset::new(draft, now))
            .returning(MeasurementRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_write_error(draft.series_id()))?;
        Ok(row.map(Measurement::from))
    }

    async fn delete(&self, id: &MeasurementId) -> Result<bool, MeasurementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(measurements::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn count_for_series(
        &self,
        series_id: &SeriesId,
    ) -> Result<u64, MeasurementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = measurements::table
            .filter(measurements::series_id.eq(series_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn find_page(
        &self,
        window: &MeasurementWindow,
        page: PageRequest,
    ) -> Result<Page<Measurement>, MeasurementRepositoryError> {
        if window.selects_nothing() {
            return Ok(Page::empty(page));
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let series_ids: Vec<Uuid> = window.series_ids().iter().map(|id| *id.as_uuid()).collect();
        let (from, to) = (window.from(), window.to());
        let (limit, offset) = (to_i64(page.limit()), to_i64(page.offset()));

        let (total, rows) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let total: i64 = measurements::table
                        .filter(measurements::series_id.eq_any(series_ids.clone()))
                        .filter(measurements::timestamp.between(from, to))
                        .count()
                        .get_result(conn)
                        .await?;
                    let rows: Vec<MeasurementRow> = measurements::table
                        .filter(measurements::series_id.eq_any(series_ids))
                        .filter(measurements::timestamp.between(from, to))
                        .order_by((measurements::timestamp.asc(), measurements::id.asc()))
                        .limit(limit)
                        .offset(offset)
                        .select(MeasurementRow::as_select())
                        .load(conn)
                        .await?;
                    Ok((total, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(Page::new(
            rows_to_measurements(rows),
            u64::try_from(total).unwrap_or(0),
            page,
        ))
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn foreign_key_failure_names_the_missing_series() {
        let series_id = SeriesId::random();
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(String::from("violates foreign key constraint")),
        );

        assert_eq!(
            map_write_error(series_id)(error),
            MeasurementRepositoryError::missing_series(series_id)
        );
    }

    #[rstest]
    fn other_write_failures_stay_query_errors() {
        let error = map_write_error(SeriesId::random())(DieselError::NotFound);

        assert!(matches!(error, MeasurementRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(u64::MAX, i64::MAX)]
    fn limits_saturate_when_converted(#[case] value: u64, #[case] expected: i64) {
        assert_eq!(to_i64(value), expected);
    }
}
