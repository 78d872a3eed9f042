//! Measurement API handlers.
//!
//! ```text
//! GET    /api/measurement?seriesIds=..&from=..&to=..&page=0&size=100
//! GET    /api/measurement/{id}
//! POST   /api/measurement  {"seriesId":"..","value":3.5,"timestamp":"2026-01-01T00:00:00Z"}
//! PUT    /api/measurement/{id}
//! DELETE /api/measurement/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::CreateMeasurementRequest;
use crate::domain::{
    Error, Measurement, MeasurementDraft, MeasurementFilter, MeasurementId,
    MeasurementValidationError, SeriesId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MeasurementPageSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, parse_id, parse_id_list, parse_optional_rfc3339_timestamp,
    parse_page_request, parse_rfc3339_timestamp, require,
};

const ID: FieldName = FieldName::new("id");
const SERIES_ID: FieldName = FieldName::new("seriesId");
const SERIES_IDS: FieldName = FieldName::new("seriesIds");
const VALUE: FieldName = FieldName::new("value");
const TIMESTAMP: FieldName = FieldName::new("timestamp");
const FROM: FieldName = FieldName::new("from");
const TO: FieldName = FieldName::new("to");

/// Request body for creating or replacing a measurement.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRequest {
    #[schema(format = "uuid")]
    pub series_id: Option<String>,
    #[schema(example = 3.5)]
    pub value: Option<f64>,
    #[schema(format = DateTime, example = "2026-01-01T00:00:00Z")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl MeasurementRequest {
    fn into_parts(self) -> Result<(MeasurementDraft, Option<String>), Error> {
        let series_id: SeriesId = parse_id(&require(self.series_id, SERIES_ID)?, SERIES_ID)?;
        let value = require(self.value, VALUE)?;
        let timestamp = parse_rfc3339_timestamp(&require(self.timestamp, TIMESTAMP)?, TIMESTAMP)?;
        let draft = MeasurementDraft::try_new(series_id, value, timestamp)
            .map_err(map_measurement_validation_error)?;
        Ok((draft, self.created_by))
    }
}

fn map_measurement_validation_error(err: MeasurementValidationError) -> Error {
    match err {
        MeasurementValidationError::NonFiniteValue => invalid_value_error(VALUE, err.to_string()),
    }
}

/// Measurement representation returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementResponse {
    pub id: Uuid,
    pub series_id: Uuid,
    pub value: f64,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    pub created_by: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Measurement> for MeasurementResponse {
    fn from(measurement: Measurement) -> Self {
        Self {
            id: *measurement.id.as_uuid(),
            series_id: *measurement.series_id.as_uuid(),
            value: measurement.value,
            timestamp: measurement.timestamp,
            created_by: measurement.audit.created_by().to_owned(),
            created_at: measurement.audit.created_at(),
            updated_at: measurement.audit.updated_at(),
        }
    }
}

/// Raw listing parameters, collected as pairs so `seriesIds` may repeat.
#[derive(Debug, Default)]
struct ListingParams {
    series_ids: Vec<String>,
    from: Option<String>,
    to: Option<String>,
    page: Option<String>,
    size: Option<String>,
}

impl ListingParams {
    fn collect(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "seriesIds" => params.series_ids.push(value),
                "from" => params.from = Some(value),
                "to" => params.to = Some(value),
                "page" => params.page = Some(value),
                "size" => params.size = Some(value),
                _ => {}
            }
        }
        params
    }

    fn filter(&self) -> Result<MeasurementFilter, Error> {
        Ok(MeasurementFilter {
            series_ids: parse_id_list(&self.series_ids, SERIES_IDS)?,
            from: parse_optional_rfc3339_timestamp(self.from.as_deref(), FROM)?,
            to: parse_optional_rfc3339_timestamp(self.to.as_deref(), TO)?,
        })
    }
}

/// List measurements filtered by series and time range, ordered by timestamp.
///
/// Without `seriesIds` every series is included. Without `from` the range
/// starts at the Unix epoch; without `to` it ends now. Both bounds are
/// inclusive.
#[utoipa::path(
    get,
    path = "/api/measurement",
    params(
        ("seriesIds" = Option<Vec<String>>, Query, description = "Series to include; repeat or comma-separate"),
        ("from" = Option<String>, Query, description = "Inclusive RFC 3339 lower bound"),
        ("to" = Option<String>, Query, description = "Inclusive RFC 3339 upper bound"),
        ("page" = Option<u32>, Query, description = "Zero-based page number, default 0"),
        ("size" = Option<u32>, Query, description = "Page size between 1 and 1000, default 100")
    ),
    responses(
        (status = 200, description = "One page of measurements", body = MeasurementPageSchema),
        (status = 400, description = "Invalid filter or page", body = ErrorSchema)
    ),
    tags = ["measurements"],
    operation_id = "queryMeasurements"
)]
#[get("/measurement")]
pub async fn query_measurements(
    state: web::Data<HttpState>,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Page<MeasurementResponse>>> {
    let params = ListingParams::collect(query.into_inner());
    let filter = params.filter()?;
    let page = parse_page_request(params.page.as_deref(), params.size.as_deref())?;
    let found = state.measurements_query.query(filter, page).await?;
    Ok(web::Json(found.map(MeasurementResponse::from)))
}

/// Fetch one measurement.
#[utoipa::path(
    get,
    path = "/api/measurement/{id}",
    params(("id" = uuid::Uuid, Path, description = "Measurement identifier")),
    responses(
        (status = 200, description = "The measurement", body = MeasurementResponse),
        (status = 404, description = "Unknown measurement", body = ErrorSchema)
    ),
    tags = ["measurements"],
    operation_id = "getMeasurement"
)]
#[get("/measurement/{id}")]
pub async fn get_measurement(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MeasurementResponse>> {
    let id: MeasurementId = parse_id(&path, ID)?;
    let measurement = state.measurements_query.get(id).await?;
    Ok(web::Json(measurement.into()))
}

/// Record a measurement against an existing series.
#[utoipa::path(
    post,
    path = "/api/measurement",
    request_body = MeasurementRequest,
    responses(
        (status = 201, description = "Measurement created", body = MeasurementResponse),
        (status = 400, description = "Invalid request or unknown series", body = ErrorSchema)
    ),
    tags = ["measurements"],
    operation_id = "createMeasurement"
)]
#[post("/measurement")]
pub async fn create_measurement(
    state: web::Data<HttpState>,
    payload: web::Json<MeasurementRequest>,
) -> ApiResult<HttpResponse> {
    let (draft, created_by) = payload.into_inner().into_parts()?;
    let measurement = state
        .measurements
        .create(CreateMeasurementRequest { draft, created_by })
        .await?;
    Ok(HttpResponse::Created().json(MeasurementResponse::from(measurement)))
}

/// Replace value, timestamp, and series of a measurement.
#[utoipa::path(
    put,
    path = "/api/measurement/{id}",
    params(("id" = uuid::Uuid, Path, description = "Measurement identifier")),
    request_body = MeasurementRequest,
    responses(
        (status = 200, description = "Measurement updated", body = MeasurementResponse),
        (status = 400, description = "Invalid request or unknown series", body = ErrorSchema),
        (status = 404, description = "Unknown measurement", body = ErrorSchema)
    ),
    tags = ["measurements"],
    operation_id = "updateMeasurement"
)]
#[put("/measurement/{id}")]
pub async fn update_measurement(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<MeasurementRequest>,
) -> ApiResult<web::Json<MeasurementResponse>> {
    let id: MeasurementId = parse_id(&path, ID)?;
    let (draft, _) = payload.into_inner().into_parts()?;
    let measurement = state.measurements.update(id, draft).await?;
    Ok(web::Json(measurement.into()))
}

/// Delete a measurement.
#[utoipa::path(
    delete,
    path = "/api/measurement/{id}",
    params(("id" = uuid::Uuid, Path, description = "Measurement identifier")),
    responses((status = 204, description = "Measurement removed or never existed")),
    tags = ["measurements"],
    operation_id = "deleteMeasurement"
)]
#[delete("/measurement/{id}")]
pub async fn delete_measurement(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: MeasurementId = parse_id(&path, ID)?;
    state.measurements.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "measurements_tests.rs"]
mod tests;
