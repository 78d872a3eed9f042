//! Shared translation of pool and Diesel failures into port errors.
//!
//! Repositories supply constructors for their own `Connection` and `Query`
//! variants. Constraint violations are surfaced separately through
//! [`constraint_violation`] so each adapter can map them to its port's
//! constraint variant.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the repository's connection constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map a Diesel failure to the repository's query or connection variant.
///
/// Only a closed connection counts as a connection failure.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Integrity constraint rejected by PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// A unique index rejected the write.
    Unique,
    /// A foreign key rejected the write or delete.
    ForeignKey,
}

/// Classify `error` when it is a constraint violation.
pub fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(constraint = info.constraint_name(), "unique violation");
            Some(ConstraintViolation::Unique)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            debug!(constraint = info.constraint_name(), "foreign key violation");
            Some(ConstraintViolation::ForeignKey)
        }
        _ => None,
    }
}
