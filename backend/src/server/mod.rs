//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use user_service::Trace;
use user_service::doc::ApiDoc;
use user_service::inbound::http::error::json_error_handler;
use user_service::inbound::http::health::{HealthState, home, live, ready};
use user_service::inbound::http::state::HttpState;
use user_service::inbound::http::users;

/// Path Swagger UI is mounted under.
pub const DOCS_PATH: &str = "/docs/";

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .configure(users::configure)
        .service(home)
        .service(ready)
        .service(live)
        .service(web::redirect("/docs", DOCS_PATH))
        .service(SwaggerUi::new("/docs/{_:.*}").url("/docs.json", ApiDoc::openapi()))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state marked ready once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] holding the bind address and optional pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
