//! Translation of store port errors into domain errors.
//!
//! Connection failures surface as `service_unavailable` so callers may retry
//! later; query failures are internal. Constraint variants keep their meaning
//! as client-facing errors with structured details.

use serde_json::json;

use crate::domain::Error;
use crate::domain::SeriesId;
use crate::domain::ports::{MeasurementRepositoryError, SeriesRepositoryError, UserRepositoryError};

/// Rejection for a measurement that references a series that is not stored.
pub(crate) fn unknown_series_error(series_id: SeriesId) -> Error {
    Error::invalid_request(format!("series {series_id} does not exist")).with_details(json!({
        "field": "seriesId",
        "value": series_id.to_string(),
        "code": "unknown_series",
    }))
}

/// Rejection for deleting a series that still owns measurements.
pub(crate) fn series_in_use_error(series_id: SeriesId) -> Error {
    Error::conflict(format!("series {series_id} still has measurements")).with_details(json!({
        "seriesId": series_id.to_string(),
        "code": "series_in_use",
    }))
}

/// Rejection for a username already held by another user.
pub(crate) fn duplicate_username_error(username: &str) -> Error {
    Error::conflict(format!("username {username} is already taken")).with_details(json!({
        "field": "username",
        "value": username,
        "code": "duplicate_username",
    }))
}

pub(crate) fn map_series_repository_error(error: SeriesRepositoryError) -> Error {
    match error {
        SeriesRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("series repository unavailable: {message}"))
        }
        SeriesRepositoryError::Query { message } => {
            Error::internal(format!("series repository error: {message}"))
        }
        SeriesRepositoryError::InUse { series_id } => series_in_use_error(series_id),
    }
}

pub(crate) fn map_measurement_repository_error(error: MeasurementRepositoryError) -> Error {
    match error {
        MeasurementRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("measurement repository unavailable: {message}"))
        }
        MeasurementRepositoryError::Query { message } => {
            Error::internal(format!("measurement repository error: {message}"))
        }
        MeasurementRepositoryError::MissingSeries { series_id } => unknown_series_error(series_id),
    }
}

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { username } => duplicate_username_error(&username),
    }
}
