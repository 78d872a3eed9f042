//! Diesel row structs and their conversions to domain records.
//!
//! Rows never leave the persistence module.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    AuditTrail, Credential, Measurement, MeasurementDraft, MeasurementId, Series, SeriesDraft,
    SeriesId, User, UserDraft, UserId,
};

use super::schema::{measurements, series, users};

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Row read from `series`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = series)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SeriesRow {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub min_value: f64,
    pub max_value: f64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SeriesRow> for Series {
    fn from(row: SeriesRow) -> Self {
        Self {
            id: SeriesId::from_uuid(row.id),
            name: row.name,
            color: row.color,
            min_value: row.min_value,
            max_value: row.max_value,
            audit: AuditTrail::restore(row.created_by, row.created_at, row.updated_at),
        }
    }
}

/// Insert into `series`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = series)]
pub(crate) struct NewSeriesRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub color: &'a str,
    pub min_value: f64,
    pub max_value: f64,
    pub created_by: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewSeriesRow<'a> {
    pub fn new(id: Uuid, draft: &'a SeriesDraft, audit: &'a AuditTrail) -> Self {
        Self {
            id,
            name: draft.name(),
            color: draft.color(),
            min_value: draft.min_value(),
            max_value: draft.max_value(),
            created_by: audit.created_by(),
            created_at: audit.created_at(),
            updated_at: audit.updated_at(),
        }
    }
}

/// Full replacement of a series' mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = series)]
pub(crate) struct SeriesChangeset<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub min_value: f64,
    pub max_value: f64,
    pub updated_at: DateTime<Utc>,
}

impl<'a> SeriesChangeset<'a> {
    pub fn new(draft: &'a SeriesDraft, now: DateTime<Utc>) -> Self {
        Self {
            name: draft.name(),
            color: draft.color(),
            min_value: draft.min_value(),
            max_value: draft.max_value(),
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Measurements
// ---------------------------------------------------------------------------

/// Row read from `measurements`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = measurements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MeasurementRow {
    pub id: Uuid,
    pub series_id: Uuid,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Self {
            id: MeasurementId::from_uuid(row.id),
            series_id: SeriesId::from_uuid(row.series_id),
            value: row.value,
            timestamp: row.timestamp,
            audit: AuditTrail::restore(row.created_by, row.created_at, row.updated_at),
        }
    }
}

/// Insert into `measurements`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = measurements)]
pub(crate) struct NewMeasurementRow<'a> {
    pub id: Uuid,
    pub series_id: Uuid,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub created_by: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewMeasurementRow<'a> {
    pub fn new(id: Uuid, draft: &MeasurementDraft, audit: &'a AuditTrail) -> Self {
        Self {
            id,
            series_id: *draft.series_id().as_uuid(),
            value: draft.value(),
            timestamp: draft.timestamp(),
            created_by: audit.created_by(),
            created_at: audit.created_at(),
            updated_at: audit.updated_at(),
        }
    }
}

/// Full replacement of a measurement's mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = measurements)]
pub(crate) struct MeasurementChangeset {
    pub series_id: Uuid,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MeasurementChangeset {
    pub fn new(draft: &MeasurementDraft, now: DateTime<Utc>) -> Self {
        Self {
            series_id: *draft.series_id().as_uuid(),
            value: draft.value(),
            timestamp: draft.timestamp(),
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            username: row.username,
            password: Credential::new(row.password),
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert into `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewUserRow<'a> {
    pub fn new(id: Uuid, draft: &'a UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: draft.username(),
            password: draft.password().expose(),
            role: draft.role(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Full replacement of a user's mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> UserChangeset<'a> {
    pub fn new(draft: &'a UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            username: draft.username(),
            password: draft.password().expose(),
            role: draft.role(),
            updated_at: now,
        }
    }
}
