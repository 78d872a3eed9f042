//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every `/api` handler, the health checks and the
//! schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves
//! it in debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::measurements::{MeasurementRequest, MeasurementResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MeasurementPageSchema};
use crate::inbound::http::series::{SeriesRequest, SeriesResponse};
use crate::inbound::http::users::{UserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Measurement backend API",
        description = "Series, measurements and users, with a paginated time-range query over measurements."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::series::list_series,
        crate::inbound::http::series::get_series,
        crate::inbound::http::series::create_series,
        crate::inbound::http::series::update_series,
        crate::inbound::http::series::delete_series,
        crate::inbound::http::measurements::query_measurements,
        crate::inbound::http::measurements::get_measurement,
        crate::inbound::http::measurements::create_measurement,
        crate::inbound::http::measurements::update_measurement,
        crate::inbound::http::measurements::delete_measurement,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::find_user_by_username,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SeriesRequest,
        SeriesResponse,
        MeasurementRequest,
        MeasurementResponse,
        MeasurementPageSchema,
        UserRequest,
        UserResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "series", description = "Named series of readings"),
        (name = "measurements", description = "Readings and the windowed query"),
        (name = "users", description = "User accounts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
