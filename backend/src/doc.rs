//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the user and health handlers plus the schema wrappers
//! from [`crate::inbound::http::schemas`]. The document is served at
//! `/docs.json`, rendered by Swagger UI under `/docs/`, and exported with
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::Server;
use utoipa::{Modify, OpenApi};

use crate::inbound::http::error::{FailureEnvelope, RejectionEnvelope};
use crate::inbound::http::schemas::{PaginationInfoSchema, UserSchema};
use crate::inbound::http::users::{
    UserAddedResponse, UserFetchedResponse, UserListResponse, UserPatchedResponse, UserPayload,
    UserReplacedResponse,
};

/// Advertise the default local listener alongside the relative server.
struct LocalServerAddon;

impl Modify for LocalServerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .servers
            .get_or_insert_with(Vec::new)
            .push(Server::new("http://localhost:4000"));
    }
}

/// OpenAPI document for the user API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&LocalServerAddon),
    info(
        title = "User API",
        description = "CRUD API for user records with page-number pagination."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::add_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user_by_id,
        crate::inbound::http::users::replace_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::health::home,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        PaginationInfoSchema,
        UserPayload,
        UserAddedResponse,
        UserListResponse,
        UserFetchedResponse,
        UserReplacedResponse,
        UserPatchedResponse,
        RejectionEnvelope,
        FailureEnvelope,
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "health", description = "Liveness and readiness endpoints")
    )
)]
pub struct ApiDoc;
