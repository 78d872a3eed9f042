//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities used by the HTTP and
//! persistence layers together with the services that implement the driving
//! ports. Types stay free of transport and storage concerns.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Series, Measurement, User: stored entities and their drafts.
//! - MeasurementFilter / MeasurementWindow: listing filter and its resolved form.
//! - SeriesService, MeasurementService, UserService: driving port implementations.

mod audit;
mod entity_id;
pub mod error;
mod measurement;
mod measurement_query;
mod measurement_service;
pub mod ports;
mod repository_errors;
mod series;
mod series_service;
mod trace_id;
mod user;
mod user_service;

pub use self::audit::{AuditTrail, DEFAULT_CREATED_BY};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::measurement::{
    Measurement, MeasurementDraft, MeasurementId, MeasurementValidationError,
};
pub use self::measurement_query::{MeasurementFilter, MeasurementWindow};
pub use self::measurement_service::MeasurementService;
pub use self::series::{Series, SeriesDraft, SeriesId, SeriesValidationError};
pub use self::series_service::SeriesService;
pub use self::trace_id::TraceId;
pub use self::user::{Credential, User, UserDraft, UserId, UserValidationError};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use measurement_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
