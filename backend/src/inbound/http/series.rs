//! Series API handlers.
//!
//! ```text
//! GET    /api/series
//! GET    /api/series/{id}
//! POST   /api/series       {"name":"Boiler","color":"#ff8800","minValue":10,"maxValue":95}
//! PUT    /api/series/{id}
//! DELETE /api/series/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::CreateSeriesRequest;
use crate::domain::{Error, Series, SeriesDraft, SeriesId, SeriesValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, parse_id, require};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");
const COLOR: FieldName = FieldName::new("color");
const MIN_VALUE: FieldName = FieldName::new("minValue");
const MAX_VALUE: FieldName = FieldName::new("maxValue");

/// Request body for creating or replacing a series.
///
/// Every mutable field is required; an update overwrites all of them.
/// `createdBy` is read on create only.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRequest {
    #[schema(example = "Boiler temperature")]
    pub name: Option<String>,
    #[schema(example = "#ff8800")]
    pub color: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl SeriesRequest {
    fn into_parts(self) -> Result<(SeriesDraft, Option<String>), Error> {
        let name = require(self.name, NAME)?;
        let color = require(self.color, COLOR)?;
        let min_value = require(self.min_value, MIN_VALUE)?;
        let max_value = require(self.max_value, MAX_VALUE)?;
        let draft = SeriesDraft::try_new(name, color, min_value, max_value)
            .map_err(map_series_validation_error)?;
        Ok((draft, self.created_by))
    }
}

fn map_series_validation_error(err: SeriesValidationError) -> Error {
    match err {
        SeriesValidationError::EmptyName => invalid_value_error(NAME, err.to_string()),
    }
}

/// Series representation returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub min_value: f64,
    pub max_value: f64,
    pub created_by: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Series> for SeriesResponse {
    fn from(series: Series) -> Self {
        Self {
            id: *series.id.as_uuid(),
            name: series.name,
            color: series.color,
            min_value: series.min_value,
            max_value: series.max_value,
            created_by: series.audit.created_by().to_owned(),
            created_at: series.audit.created_at(),
            updated_at: series.audit.updated_at(),
        }
    }
}

/// List every series, oldest first.
#[utoipa::path(
    get,
    path = "/api/series",
    responses(
        (status = 200, description = "All series", body = [SeriesResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["series"],
    operation_id = "listSeries"
)]
#[get("/series")]
pub async fn list_series(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<SeriesResponse>>> {
    let series = state.series_query.list().await?;
    Ok(web::Json(series.into_iter().map(SeriesResponse::from).collect()))
}

/// Fetch one series.
#[utoipa::path(
    get,
    path = "/api/series/{id}",
    params(("id" = uuid::Uuid, Path, description = "Series identifier")),
    responses(
        (status = 200, description = "The series", body = SeriesResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown series", body = ErrorSchema)
    ),
    tags = ["series"],
    operation_id = "getSeries"
)]
#[get("/series/{id}")]
pub async fn get_series(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SeriesResponse>> {
    let id: SeriesId = parse_id(&path, ID)?;
    let series = state.series_query.get(id).await?;
    Ok(web::Json(series.into()))
}

/// Create a series.
#[utoipa::path(
    post,
    path = "/api/series",
    request_body = SeriesRequest,
    responses(
        (status = 201, description = "Series created", body = SeriesResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["series"],
    operation_id = "createSeries"
)]
#[post("/series")]
pub async fn create_series(
    state: web::Data<HttpState>,
    payload: web::Json<SeriesRequest>,
) -> ApiResult<HttpResponse> {
    let (draft, created_by) = payload.into_inner().into_parts()?;
    let series = state
        .series
        .create(CreateSeriesRequest { draft, created_by })
        .await?;
    Ok(HttpResponse::Created().json(SeriesResponse::from(series)))
}

/// Replace every mutable field of a series.
#[utoipa::path(
    put,
    path = "/api/series/{id}",
    params(("id" = uuid::Uuid, Path, description = "Series identifier")),
    request_body = SeriesRequest,
    responses(
        (status = 200, description = "Series updated", body = SeriesResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown series", body = ErrorSchema)
    ),
    tags = ["series"],
    operation_id = "updateSeries"
)]
#[put("/series/{id}")]
pub async fn update_series(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<SeriesRequest>,
) -> ApiResult<web::Json<SeriesResponse>> {
    let id: SeriesId = parse_id(&path, ID)?;
    let (draft, _) = payload.into_inner().into_parts()?;
    let series = state.series.update(id, draft).await?;
    Ok(web::Json(series.into()))
}

/// Delete a series that no measurement references.
#[utoipa::path(
    delete,
    path = "/api/series/{id}",
    params(("id" = uuid::Uuid, Path, description = "Series identifier")),
    responses(
        (status = 204, description = "Series removed or never existed"),
        (status = 409, description = "Measurements still reference the series", body = ErrorSchema)
    ),
    tags = ["series"],
    operation_id = "deleteSeries"
)]
#[delete("/series/{id}")]
pub async fn delete_series(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: SeriesId = parse_id(&path, ID)?;
    state.series.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "series_tests.rs"]
mod tests;
