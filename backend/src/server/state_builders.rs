//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use user_service::domain::UserService;
use user_service::inbound::http::state::HttpState;
use user_service::outbound::memory::InMemoryUserRepository;
use user_service::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build the handler state, backed by PostgreSQL when a pool is configured
/// and by process memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            let service = Arc::new(UserService::new(
                Arc::new(DieselUserRepository::new(pool.clone())),
                clock,
            ));
            HttpState::new(service.clone(), service)
        }
        None => {
            let service = Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::default()),
                clock,
            ));
            HttpState::new(service.clone(), service)
        }
    };
    web::Data::new(state)
}
