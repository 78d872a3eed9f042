//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain types and the pagination envelope remain framework-agnostic. This
//! module mirrors their wire shape so the OpenAPI document can describe them.

use utoipa::ToSchema;

use crate::inbound::http::measurements::MeasurementResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with stored state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "series name must not be empty")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "0b6e3f4c-7d1a-4b2e-9c8f-5a6d7e8f9a0b")]
    trace_id: Option<String>,
    /// Supplementary details such as `field`, `code`, and `value`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for a page of measurements.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MeasurementPageSchema {
    /// Measurements on this page, ordered by timestamp then identifier.
    content: Vec<MeasurementResponse>,
    /// Number of measurements matching the filter across all pages.
    total_elements: u64,
    /// Number of pages at the requested size.
    total_pages: u64,
    /// Requested page size.
    size: u32,
    /// Zero-based page number.
    number: u32,
    /// Number of measurements on this page.
    number_of_elements: u32,
    /// Whether this is the first page.
    first: bool,
    /// Whether this is the last page.
    last: bool,
    /// Whether this page has no content.
    empty: bool,
}
