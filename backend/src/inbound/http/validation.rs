//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose details carry the
//! offending `field`, a machine-readable `code`, and the rejected `value`
//! (plus its `index` for list parameters).

use chrono::{DateTime, Utc};
use pagination::{DEFAULT_PAGE_SIZE, PageRequest, PageRequestError};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidUuid,
    InvalidTimestamp,
    InvalidNumber,
    InvalidPageSize,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidPageSize => "invalid_page_size",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Rejection for a field whose value fails a domain rule.
pub(crate) fn invalid_value_error(field: FieldName, message: impl Into<String>) -> Error {
    ValidationError::new(field.as_str(), message).with_code(ErrorCode::InvalidValue)
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

fn invalid_uuid_index_error(field: FieldName, index: usize, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must contain valid UUIDs")).with_index(
        ErrorCode::InvalidUuid,
        index,
        value,
    )
}

/// Parse an identifier path segment into an entity identifier.
pub(crate) fn parse_id<T: From<Uuid>>(value: &str, field: FieldName) -> Result<T, Error> {
    Uuid::parse_str(value.trim())
        .map(T::from)
        .map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a list of identifiers.
///
/// Each raw value may itself hold several comma-separated identifiers, so
/// `?ids=a&ids=b` and `?ids=a,b` are equivalent. Empty segments are skipped.
pub(crate) fn parse_id_list<T: From<Uuid>>(
    values: &[String],
    field: FieldName,
) -> Result<Vec<T>, Error> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| {
            Uuid::parse_str(segment)
                .map(T::from)
                .map_err(|_| invalid_uuid_index_error(field, index, segment))
        })
        .collect()
}

fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, value))
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

fn parse_optional_u32(value: Option<&str>, field: FieldName) -> Result<Option<u32>, Error> {
    value
        .map(|raw| {
            raw.trim().parse::<u32>().map_err(|_| {
                let name = field.as_str();
                ValidationError::new(name, format!("{name} must be a non-negative integer"))
                    .with_value(ErrorCode::InvalidNumber, raw)
            })
        })
        .transpose()
}

/// Build a page request from optional `page` and `size` query values.
pub(crate) fn parse_page_request(
    page: Option<&str>,
    size: Option<&str>,
) -> Result<PageRequest, Error> {
    const PAGE: FieldName = FieldName::new("page");
    const SIZE: FieldName = FieldName::new("size");

    let number = parse_optional_u32(page, PAGE)?.unwrap_or(0);
    let size = parse_optional_u32(size, SIZE)?.unwrap_or(DEFAULT_PAGE_SIZE);
    PageRequest::new(number, size).map_err(|err| match err {
        PageRequestError::ZeroSize | PageRequestError::SizeTooLarge { .. } => {
            ValidationError::new(SIZE.as_str(), err.to_string())
                .with_value(ErrorCode::InvalidPageSize, size.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, SeriesId};
    use rstest::rstest;

    const IDS: FieldName = FieldName::new("seriesIds");

    #[rstest]
    fn id_list_accepts_repeated_and_comma_separated_values() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();
        let values = vec![format!("{first},{second}"), format!(" {third} "), String::new()];

        let ids: Vec<SeriesId> = parse_id_list(&values, IDS).expect("valid ids");

        assert_eq!(
            ids,
            vec![
                SeriesId::from_uuid(first),
                SeriesId::from_uuid(second),
                SeriesId::from_uuid(third)
            ]
        );
    }

    #[rstest]
    fn id_list_reports_index_of_bad_segment() {
        let values = vec![format!("{},oops", Uuid::new_v4())];

        let error = parse_id_list::<SeriesId>(&values, IDS).expect_err("bad uuid");

        let details = error.details().expect("details");
        assert_eq!(details["index"], 1);
        assert_eq!(details["value"], "oops");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    #[case("2026-01-02T03:04:05Z")]
    #[case("2026-01-02T04:04:05+01:00")]
    fn timestamps_normalise_to_utc(#[case] raw: &str) {
        let parsed = parse_rfc3339_timestamp(raw, FieldName::new("from")).expect("valid");
        assert_eq!(parsed.to_rfc3339(), "2026-01-02T03:04:05+00:00");
    }

    #[rstest]
    fn bad_timestamp_names_the_field() {
        let error =
            parse_optional_rfc3339_timestamp(Some("yesterday"), FieldName::new("to")).expect_err("bad");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(error.details().expect("details")["field"], "to");
    }

    #[rstest]
    fn page_request_defaults_apply() {
        let page = parse_page_request(None, None).expect("defaults");
        assert_eq!(page, PageRequest::default());
    }

    #[rstest]
    #[case(Some("1"), Some("0"), "size")]
    #[case(Some("1"), Some("1001"), "size")]
    #[case(Some("-1"), None, "page")]
    #[case(None, Some("ten"), "size")]
    fn page_request_rejects_bad_values(
        #[case] page: Option<&str>,
        #[case] size: Option<&str>,
        #[case] field: &str,
    ) {
        let error = parse_page_request(page, size).expect_err("invalid page");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(error.details().expect("details")["field"], field);
    }

    #[rstest]
    fn missing_fields_are_reported() {
        let error = require::<String>(None, FieldName::new("name")).expect_err("missing");
        assert_eq!(error.details().expect("details")["code"], "missing_field");
    }
}
