//! PostgreSQL-backed `SeriesRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SeriesRepository, SeriesRepositoryError};
use crate::domain::{AuditTrail, Series, SeriesDraft, SeriesId};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewSeriesRow, SeriesChangeset, SeriesRow};
use super::pool::{DbPool, PoolError};
use super::schema::series;

/// Diesel implementation of the series store.
#[derive(Clone)]
pub struct DieselSeriesRepository {
    pool: DbPool,
}

impl DieselSeriesRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SeriesRepositoryError {
    map_basic_pool_error(error, SeriesRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SeriesRepositoryError {
    map_basic_diesel_error(
        error,
        SeriesRepositoryError::query,
        SeriesRepositoryError::connection,
    )
}

#[async_trait]
impl SeriesRepository for DieselSeriesRepository {
    async fn create(
        &self,
        draft: &SeriesDraft,
        audit: &AuditTrail,
    ) -> Result<Series, SeriesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSeriesRow::new(Uuid::new_v4(), draft, audit);

        let stored: SeriesRow = diesel::insert_into(series::table)
            .values(&row)
            .returning(SeriesRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(stored.into())
    }

    async fn find_by_id(&self, id: &SeriesId) -> Result<Option<Series>, SeriesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SeriesRow> = series::table
            .find(id.as_uuid())
            .select(SeriesRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Series::from))
    }

    async fn list_all(&self) -> Result<Vec<Series>, SeriesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SeriesRow> = series::table
            .select(SeriesRow::as_select())
            .order_by((series::created_at.asc(), series::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Series::from).collect())
    }

    async fn find_all_by_id(&self, ids: &[SeriesId]) -> Result<Vec<Series>, SeriesRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<SeriesRow> = series::table
            .filter(series::id.eq_any(uuids))
            .select(SeriesRow::as_select())
            .order_by((series::created_at.asc(), series::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Series::from).collect())
    }

    async fn update(
        &self,
        id: &SeriesId,
        draft: &SeriesDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Series>, SeriesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SeriesRow> = diesel::update(series::table.find(id.as_uuid()))
            .set(SeriesChangeset::new(draft, now))
            .returning(SeriesRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Series::from))
    }

    async fn delete(&self, id: &SeriesId) -> Result<bool, SeriesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(series::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|error| match constraint_violation(&error) {
                Some(ConstraintViolation::ForeignKey) => SeriesRepositoryError::in_use(*id),
                _ => map_diesel_error(error),
            })?;
        Ok(deleted > 0)
    }
}
