//! User API handlers.
//!
//! ```text
//! POST   /api/user         {"username":"ada","password":"s3cret","role":"admin"}
//! GET    /api/user?username=ada
//! GET    /api/user/{id}
//! PUT    /api/user/{id}
//! DELETE /api/user/{id}
//! ```
//!
//! The password is accepted on writes and never returned.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, User, UserDraft, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, parse_id, require};

const ID: FieldName = FieldName::new("id");
const USERNAME: FieldName = FieldName::new("username");
const PASSWORD: FieldName = FieldName::new("password");
const ROLE: FieldName = FieldName::new("role");

/// Request body for creating or replacing a user.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(write_only)]
    pub password: Option<String>,
    #[schema(example = "admin")]
    pub role: Option<String>,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        let username = require(value.username, USERNAME)?;
        let password = require(value.password, PASSWORD)?;
        let role = require(value.role, ROLE)?;
        UserDraft::try_new(username, password, role).map_err(map_user_validation_error)
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let field = match err {
        UserValidationError::EmptyUsername | UserValidationError::UntrimmedUsername => USERNAME,
        UserValidationError::EmptyRole => ROLE,
    };
    invalid_value_error(field, err.to_string())
}

/// User representation returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Query string for `GET /api/user`.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users.create(draft).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Look up a user by exact username.
#[utoipa::path(
    get,
    path = "/api/user",
    params(("username" = String, Query, description = "Exact username")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 400, description = "Missing username", body = ErrorSchema),
        (status = 404, description = "Unknown username", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "findUserByUsername"
)]
#[get("/user")]
pub async fn find_user_by_username(
    state: web::Data<HttpState>,
    query: web::Query<UsernameQuery>,
) -> ApiResult<web::Json<UserResponse>> {
    let username = require(query.into_inner().username, USERNAME)?;
    let user = state.users_query.find_by_username(&username).await?;
    Ok(web::Json(user.into()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    params(("id" = uuid::Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id: UserId = parse_id(&path, ID)?;
    let user = state.users_query.get(id).await?;
    Ok(web::Json(user.into()))
}

/// Replace username, password, and role of a user.
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    params(("id" = uuid::Uuid, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id: UserId = parse_id(&path, ID)?;
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users.update(id, draft).await?;
    Ok(web::Json(user.into()))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(("id" = uuid::Uuid, Path, description = "User identifier")),
    responses((status = 204, description = "User removed or never existed")),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_id(&path, ID)?;
    state.users.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
