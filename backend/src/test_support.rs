//! Test utilities for the user-service crate.
//!
//! Shared by integration tests in `tests/` through the `test-support`
//! feature: a settable clock and an in-memory wiring of the user ports.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::web;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::UserService;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;
use crate::outbound::memory::InMemoryUserRepository;

/// Clock whose reading only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Default for MutableClock {
    fn default() -> Self {
        match Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single() {
            Some(now) => Self::new(now),
            None => panic!("fixture timestamp is valid"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Handler state over a fresh in-memory repository and the given clock.
pub fn memory_http_state(clock: Arc<dyn Clock>) -> HttpState {
    let service = Arc::new(UserService::new(
        Arc::new(InMemoryUserRepository::default()),
        clock,
    ));
    HttpState::new(service.clone(), service)
}

/// Register `state`, the JSON error handler and the user routes, mirroring
/// the production app minus middleware and docs.
pub fn configure_users(state: HttpState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler));
        users::configure(cfg);
    }
}
