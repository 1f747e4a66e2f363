use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::DEFAULT_TIMEZONE;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    None,
    Basic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub basic: Option<BasicAuthConfig>,
}

/// Credentials for the back-office basic auth guard.
///
/// `password_hash` is an Argon2 PHC string, see the `hash_password` binary.
#[derive(Clone, Deserialize)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password_hash: String,
}

impl std::fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// `url` may embed the database password and is left out of `Debug`.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u8,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// What a board does with an optimistic change whose persistence call failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistFailurePolicy {
    /// Restore the slot to its state before the change.
    #[default]
    Rollback,
    /// Leave the in-memory change in place until the next reload.
    Keep,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    pub timezone: String,
    pub on_persist_failure: PersistFailurePolicy,
}

impl BoardConfig {
    /// ## Summary
    /// Parses the configured IANA time zone.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the name is not a known time zone.
    pub fn tz(&self) -> CoreResult<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| CoreError::ConfigError(format!("invalid board.timezone: {e}")))
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            on_persist_failure: PersistFailurePolicy::default(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `config.toml`.
    /// Environment variables use the `ESCALA_` prefix and `__` as the section separator,
    /// e.g. `ESCALA_DATABASE__URL`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.max_connections", 4)?
            .set_default("storage.backend", "postgres")?
            .set_default("logging.level", "debug")?
            .set_default("auth.method", "none")?
            .set_default("board.timezone", DEFAULT_TIMEZONE)?
            .set_default("board.on_persist_failure", "rollback")?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Environment
            .add_source(
                config::Environment::with_prefix("ESCALA")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks cross-field constraints that serde cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` when a required section is missing.
    pub fn validate(&self) -> CoreResult<()> {
        if self.storage.backend == StorageBackend::Postgres && self.database.url.is_none() {
            return Err(CoreError::ConfigError(
                "database.url is required for the postgres storage backend".to_string(),
            ));
        }

        if self.auth.method == AuthMethod::Basic && self.auth.basic.is_none() {
            return Err(CoreError::ConfigError(
                "auth.basic is required when auth.method = basic".to_string(),
            ));
        }

        self.board.tz()?;

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
