//! HTTP server configuration: layered settings and the server builder.

use std::net::{AddrParseError, SocketAddr};

use actix_web::cookie::{Key, SameSite};
use kitchen::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Startup settings loaded from CLI arguments, `KITCHEN_*` variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KITCHEN")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it records live in memory.
    pub database_url: Option<String>,
    /// Username of a cook created at startup when missing.
    pub bootstrap_username: Option<String>,
    /// Password for the bootstrap cook.
    pub bootstrap_password: Option<String>,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// The bootstrap cook's credentials when both halves are configured.
    pub fn bootstrap_cook(&self) -> Option<(&str, &str)> {
        match (&self.bootstrap_username, &self.bootstrap_password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from session preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Store records in PostgreSQL through `pool` instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Settings layering over environment variables.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "KITCHEN_BIND_ADDR",
        "KITCHEN_DATABASE_URL",
        "KITCHEN_BOOTSTRAP_USERNAME",
        "KITCHEN_BOOTSTRAP_PASSWORD",
    ];

    fn load_with(values: [Option<&str>; 4]) -> ServerSettings {
        let _guard = lock_env(
            VARS.iter()
                .zip(values)
                .map(|(name, value)| (*name, value.map(str::to_owned))),
        );
        ServerSettings::load_from_iter([OsString::from("kitchen")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with([None; 4]);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url.is_none());
        assert!(settings.bootstrap_cook().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with([
            Some("127.0.0.1:9000"),
            Some("postgres://kitchen@localhost/kitchen"),
            Some("chef"),
            Some("pasta-al-dente"),
        ]);
        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9000
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://kitchen@localhost/kitchen")
        );
        assert_eq!(settings.bootstrap_cook(), Some(("chef", "pasta-al-dente")));
    }

    #[rstest]
    fn bootstrap_needs_both_credentials() {
        let settings = load_with([None, None, Some("chef"), None]);
        assert!(settings.bootstrap_cook().is_none());
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = load_with([Some("not-an-address"), None, None, None]);
        assert!(settings.bind_addr().is_err());
    }

    #[rstest]
    fn server_config_keeps_the_bind_address() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("literal");
        let config = ServerConfig::new(Key::generate(), false, SameSite::Lax, addr);
        assert_eq!(config.bind_addr(), addr);
        assert!(config.db_pool.is_none());
    }
}
