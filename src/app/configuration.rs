use std::env;

use config::{
    Config,
    ConfigError,
    Environment,
    File,
};
use custom_error::custom_error;
use sqlx::postgres::{
    PgConnectOptions,
    PgSslMode,
};

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub database: DatabaseSettings,
    pub rate_limit: RateLimitSettings,
    pub storage: StorageSettings,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    /// Default `tracing` filter, `RUST_LOG` takes precedence when set.
    pub log_level: String,
    pub max_pending_connections: u32,
    pub port: u16,
}

/// The single admin account and the secret its tokens are signed with.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AuthSettings {
    pub admin_email: String,
    pub admin_password: String,
    pub token_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct DatabaseSettings {
    pub connect_timeout_seconds: u64,
    pub name: String,
    pub host: String,
    pub max_db_connections: u32,
    pub password: String,
    pub port: u16,
    pub require_ssl: bool,
    pub username: String,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_seconds: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

impl ApplicationSettings {
    pub fn binding_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    pub fn pgserver_connection_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(&self.password)
            .port(self.port)
            .ssl_mode(ssl_mode)
    }
    pub fn database_connection_options(&self) -> PgConnectOptions {
        self.pgserver_connection_options().database(&self.name)
    }
}

custom_error! {
///! Custom error for missing or invalid configuration files.
pub ConfigurationError
    InvalidConfig{source:ConfigError} = "{source}",
}

/// Load the configuration from the directory: `configuration`.
///
/// `APP_ENVIRONMENT` selects the overlay file and defaults to `local`.
///
/// It fails if:
/// - the `configuration/base` file is missing
/// - the `configuration/${APP_ENVIRONMENT}` file is missing
/// - the `configuration/*` files have missing or unexpected fields
///
/// # Examples
///
/// ```rust
/// use site_backend::app::load_configuration;
///
/// let settings = load_configuration().unwrap();
/// assert_eq!(settings.application.log_level, "info");
/// ```
pub fn load_configuration() -> Result<Settings, ConfigurationError> {
    let app_environment = env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());

    // Settings from environment variables use the APP prefix and `__` as
    // separator, e.g. `APP_APPLICATION__PORT=5001` sets `application.port`.
    let config = Config::builder()
        .add_source(File::with_name("configuration/base").required(true))
        .add_source(File::with_name(&format!("configuration/{}", app_environment)).required(true))
        .add_source(
            Environment::with_prefix("app")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
