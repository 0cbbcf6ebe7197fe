//! Service configuration
//!
//! Settings are layered: built-in defaults, then an optional
//! `config/sellers.toml`, then `SELLERS_`-prefixed environment variables using
//! `__` between nested keys (for example `SELLERS_SERVER__PORT=8080`).

use common::database::DatabaseConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Top-level service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseConfig,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Settings {
    /// Load settings from defaults, the optional config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let database = DatabaseConfig::default();

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.database_url", database.database_url)?
            .set_default("database.max_connections", i64::from(database.max_connections))?
            .set_default("database.connection_timeout", database.connection_timeout as i64)?
            .set_default("log_level", "info")?
            .add_source(File::with_name("config/sellers").required(false))
            .add_source(
                Environment::with_prefix("SELLERS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
