//! User resource handlers.
//!
//! ```text
//! POST  /addUser {"name":"Ada","email":"ada@example.com","dob":"1815-12-10"}
//! GET   /getUser/{offset}/{limit}
//! GET   /getUserById/{id}
//! PUT   /updateWithPutById/{id}
//! PATCH /updateWithPatchById/{id}
//! ```
//!
//! Handlers only translate between HTTP and the user ports; failures are
//! rendered by the `ResponseError` impl in [`super::error`].

use actix_web::{HttpResponse, get, patch, post, put, web};
use pagination::{PageRequest, PaginationInfo};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{FailureEnvelope, RejectionEnvelope};
use crate::inbound::http::lenient;
use crate::inbound::http::schemas::{PaginationInfoSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Request body shared by create, replace and partial update.
///
/// Every field is optional at this layer; absent and `null` are the same.
/// The domain decides which fields a given operation requires. Scalars are
/// read leniently: numbers and booleans become text, `isActive` also accepts
/// `"true"`/`"false"`, `1`/`0` and `"yes"`/`"no"`, and a numeric `dob` is epoch
/// milliseconds.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[schema(example = "Ada Lovelace")]
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,
    /// `YYYY-MM-DD`, an RFC 3339 timestamp or epoch milliseconds.
    #[schema(example = "1815-12-10")]
    #[serde(default, deserialize_with = "lenient::date")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: Option<bool>,
}

impl From<UserPayload> for UserDraft {
    fn from(payload: UserPayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            dob: payload.dob,
            is_active: payload.is_active,
        }
    }
}

/// Optional page segments of `/getUser/{offset}/{limit}`, kept as raw text.
#[derive(Debug, Default, Deserialize)]
pub struct PageSegments {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl PageSegments {
    fn to_request(&self) -> Result<PageRequest, Error> {
        PageRequest::from_segments(self.offset.as_deref(), self.limit.as_deref())
            .map_err(|err| Error::unexpected("PageRequestError", err.to_string(), None))
    }
}

/// Response for `POST /addUser`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserAddedResponse {
    pub error: bool,
    #[schema(example = "User Added")]
    pub message: String,
    #[schema(value_type = UserSchema)]
    pub data: User,
}

/// Response for `GET /getUser`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub error: bool,
    #[schema(value_type = Vec<UserSchema>)]
    pub users: Vec<User>,
    #[schema(value_type = PaginationInfoSchema)]
    pub pagination_info: PaginationInfo,
}

/// Response for `GET /getUserById/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserFetchedResponse {
    pub error: bool,
    #[schema(example = "user is fetched successfully")]
    pub message: String,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Response for `PUT /updateWithPutById/{id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReplacedResponse {
    pub error: bool,
    #[schema(example = "user updated")]
    pub message: String,
    /// State before the update.
    #[schema(value_type = UserSchema)]
    pub user_to_update: User,
    /// State read back after the update; `null` if the record vanished.
    #[schema(value_type = Option<UserSchema>)]
    pub user_after_update: Option<User>,
}

/// Response for `PATCH /updateWithPatchById/{id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatchedResponse {
    pub error: bool,
    #[schema(example = "User partially updated")]
    pub message: String,
    #[schema(value_type = UserSchema)]
    pub updated_user: User,
}

/// Create a user.
///
/// Missing `name`, `email` or `dob`, an unparsable `dob` and a duplicate
/// `email` all answer 400 with the failure echoed in `errorobj`.
#[utoipa::path(
    post,
    path = "/addUser",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User created", body = UserAddedResponse),
        (status = 400, description = "Validation or persistence failure", body = FailureEnvelope)
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/addUser")]
pub async fn add_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    info!(user_id = %user.id(), "user created");
    Ok(HttpResponse::Ok().json(UserAddedResponse {
        error: false,
        message: "User Added".to_owned(),
        data: user,
    }))
}

/// List users one page at a time, in insertion order.
///
/// `offset` is the 1-based page number (default 1) and `limit` the page
/// size (default 5); either may be omitted from the path
/// (`/getUser`, `/getUser/{offset}`). Segments are read by their leading
/// integer and text without one falls back to the default. Zero or a
/// negative number answers 400; a page too large to count answers 401.
#[utoipa::path(
    get,
    path = "/getUser/{offset}/{limit}",
    params(
        ("offset" = String, Path, description = "Page number, 1-based; optional, default 1"),
        ("limit" = String, Path, description = "Page size; optional, default 5")
    ),
    responses(
        (status = 200, description = "Page of users", body = UserListResponse),
        (status = 400, description = "Non-positive page segment or persistence failure", body = FailureEnvelope),
        (status = 401, description = "Page number past the last page", body = RejectionEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn list_users(
    state: web::Data<HttpState>,
    segments: web::Path<PageSegments>,
) -> ApiResult<HttpResponse> {
    let request = segments.to_request()?;
    let page = state.users_query.list_users(request).await?;
    Ok(HttpResponse::Ok().json(UserListResponse {
        error: false,
        users: page.users,
        pagination_info: page.pagination,
    }))
}

/// Fetch one user.
///
/// An unknown id answers 401; an id the store cannot interpret answers 400.
#[utoipa::path(
    get,
    path = "/getUserById/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserFetchedResponse),
        (status = 400, description = "Malformed identifier or persistence failure", body = FailureEnvelope),
        (status = 401, description = "No user with this identifier", body = RejectionEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/getUserById/{id}")]
pub async fn get_user_by_id(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(id.into_inner());
    let user = state.users_query.find_user(&id).await?;
    Ok(HttpResponse::Ok().json(UserFetchedResponse {
        error: false,
        message: "user is fetched successfully".to_owned(),
        user,
    }))
}

/// Replace every field of a user.
///
/// All of `name`, `email`, `dob` and `isActive` are required; `isActive:
/// false` counts as present. Returns the record before and after the update.
#[utoipa::path(
    put,
    path = "/updateWithPutById/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User replaced", body = UserReplacedResponse),
        (status = 400, description = "Validation or persistence failure", body = FailureEnvelope),
        (status = 401, description = "Missing field or unknown identifier", body = RejectionEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateWithPutById"
)]
#[put("/updateWithPutById/{id}")]
pub async fn replace_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(id.into_inner());
    let replaced = state
        .users_command
        .replace_user(&id, payload.into_inner().into())
        .await?;
    info!(user_id = %id, "user replaced");
    Ok(HttpResponse::Ok().json(UserReplacedResponse {
        error: false,
        message: "user updated".to_owned(),
        user_to_update: replaced.before,
        user_after_update: replaced.after,
    }))
}

/// Update the provided fields of a user and return the result.
#[utoipa::path(
    patch,
    path = "/updateWithPatchById/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserPatchedResponse),
        (status = 400, description = "Validation or persistence failure", body = FailureEnvelope),
        (status = 401, description = "No user with this identifier", body = RejectionEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateWithPatchById"
)]
#[patch("/updateWithPatchById/{id}")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(id.into_inner());
    let updated_user = state
        .users_command
        .patch_user(&id, payload.into_inner().into())
        .await?;
    info!(user_id = %id, "user partially updated");
    Ok(HttpResponse::Ok().json(UserPatchedResponse {
        error: false,
        message: "User partially updated".to_owned(),
        updated_user,
    }))
}

/// Register the user routes on an app or scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::users;
///
/// let _app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(add_user)
        .service(
            web::resource(["/getUser", "/getUser/{offset}", "/getUser/{offset}/{limit}"])
                .route(web::get().to(list_users)),
        )
        .service(get_user_by_id)
        .service(replace_user)
        .service(patch_user);
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
