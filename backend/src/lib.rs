//! User service library modules.
//!
//! Layout follows a hexagonal split: [`domain`] holds the user model, ports
//! and service; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the repository port for PostgreSQL and for process memory.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
