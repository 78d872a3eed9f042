//! Translation of domain errors into HTTP responses.
//!
//! Every failure leaves the server as the same JSON envelope: handler
//! errors through the [`ResponseError`] impl below, extractor rejections
//! through the `*_error_handler` functions registered by
//! [`super::configure_api`]. Internal failures are logged in full and
//! reduced to a generic message before they reach the client.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Part of the request an extractor failed to decode.
#[derive(Debug, Clone, Copy)]
enum RejectedPart {
    Body,
    Path,
    Query,
}

impl RejectedPart {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Path => "path",
            Self::Query => "query",
        }
    }

    fn reject(self, reason: String) -> actix_web::Error {
        let part = self.as_str();
        debug!(part, %reason, "request rejected by extractor");
        Error::invalid_request(format!("malformed request {part}"))
            .with_details(json!({ "source": part, "reason": reason, "code": "malformed" }))
            .into()
    }
}

const fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The body a client is allowed to see for `error`.
fn client_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(message = %error.message(), "internal error returned to client");
    error
        .trace_id()
        .map_or_else(
            || Error::internal(INTERNAL_MESSAGE),
            |id| Error::internal(INTERNAL_MESSAGE).with_trace_id(id.to_owned()),
        )
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(client_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_MESSAGE)
    }
}

/// `web::JsonConfig` error handler.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    RejectedPart::Body.reject(err.to_string())
}

/// `web::PathConfig` error handler.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    RejectedPart::Path.reject(err.to_string())
}

/// `web::QueryConfig` error handler.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    RejectedPart::Query.reject(err.to_string())
}
