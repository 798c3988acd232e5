//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_API_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence. The historic
//! `DB_URL` variable is still honoured as a fallback for the connection
//! string.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DB_POOL_SIZE: u32 = 10;

/// Legacy variable consulted when no connection string is configured.
pub const LEGACY_DB_URL_ENV: &str = "DB_URL";

/// Runtime settings for the user service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_API")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub db_url: Option<String>,
    /// Listen address.
    pub host: Option<IpAddr>,
    /// Listen port.
    pub port: Option<u16>,
    /// Maximum number of pooled database connections.
    pub db_pool_size: Option<u32>,
}

impl AppSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:4000`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured pool size, defaulting to 10.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE)
    }

    /// Resolve the connection string.
    ///
    /// `db_url` wins; otherwise `DB_URL` is read from `env`. Blank values
    /// count as unset.
    ///
    /// # Examples
    /// ```
    /// use mockable::MockEnv;
    /// use user_service::config::AppSettings;
    ///
    /// let settings = AppSettings {
    ///     db_url: None,
    ///     host: None,
    ///     port: None,
    ///     db_pool_size: None,
    /// };
    /// let mut env = MockEnv::new();
    /// env.expect_string()
    ///     .returning(|name| (name == "DB_URL").then(|| "postgres://db/users".to_owned()));
    /// assert_eq!(
    ///     settings.database_url(&env).as_deref(),
    ///     Some("postgres://db/users")
    /// );
    /// ```
    pub fn database_url(&self, env: &impl Env) -> Option<String> {
        self.db_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                env.string(LEGACY_DB_URL_ENV)
                    .filter(|url| !url.trim().is_empty())
            })
    }
}
