//! Configuration management for the incident dashboard service
//!
//! Values come from built-in defaults, then an optional `config.toml`, then
//! `DASHBOARD_*` environment variables (`__` separates nested keys, e.g.
//! `DASHBOARD_SERVER__PORT=9000`).

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::path::PathBuf;

/// Complete service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub limits: LimitSettings,
}

/// Network settings for the access service
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// IP address to bind the listener
    pub bind_address: String,

    /// Listener port
    pub port: u16,

    /// Maximum concurrently connected clients
    pub max_clients: usize,

    /// Maximum length of a single command line
    pub max_command_length: usize,
}

/// Credential store location
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// Path of the JSON backing record
    pub users_file: String,
}

/// Input limits applied before credentials reach the store
#[derive(Debug, Deserialize, Clone)]
pub struct LimitSettings {
    pub max_username_length: usize,
    pub max_password_length: usize,
}

impl AppConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        // Try the packaged path first, then the working directory
        let config_paths = ["dashboard/config", "config"];

        let mut builder = Self::defaults()?;
        for config_path in config_paths {
            builder = builder.add_source(File::with_name(config_path).required(false));
        }

        Self::from_builder(builder)
    }

    /// Load configuration from one explicit file, still honoring environment overrides
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::with_name(path));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings = builder
            .add_source(
                Environment::with_prefix("DASHBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.bind_address", "127.0.0.1")?
            .set_default("server.port", 2323_i64)?
            .set_default("server.max_clients", 32_i64)?
            .set_default("server.max_command_length", 512_i64)?
            .set_default("store.users_file", "users.json")?
            .set_default("limits.max_username_length", 64_i64)?
            .set_default("limits.max_password_length", 256_i64)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.server.max_clients == 0 {
            return Err(ConfigError::Message(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.server.max_command_length == 0 {
            return Err(ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if self.store.users_file.trim().is_empty() {
            return Err(ConfigError::Message("users_file cannot be empty".into()));
        }

        if self.limits.max_username_length == 0 || self.limits.max_password_length == 0 {
            return Err(ConfigError::Message(
                "credential length limits must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

impl ServerSettings {
    /// Get bind address and port as a socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl StoreSettings {
    /// Get the backing record location as PathBuf
    pub fn users_file_path(&self) -> PathBuf {
        PathBuf::from(&self.users_file)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                bind_address: "127.0.0.1".to_string(),
                port: 2323,
                max_clients: 32,
                max_command_length: 512,
            },
            store: StoreSettings {
                users_file: "users.json".to_string(),
            },
            limits: LimitSettings {
                max_username_length: 64,
                max_password_length: 256,
            },
        }
    }
}
