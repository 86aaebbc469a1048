//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `wattwise.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use wattwise_app::config::{ControlConfig, SensorsConfig};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Platform (Home Assistant) connection settings.
    pub platform: PlatformConfig,
    /// Sensor ids feeding the condition reader and forecast service.
    pub sensors: SensorsConfig,
    /// Control algorithm tunables.
    pub control: ControlConfig,
    /// Registry persistence settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Platform connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Base URL of the platform API, without trailing slash.
    pub base_url: String,
    /// Long-lived access token.
    pub token: String,
}

/// Registry document location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the managed-devices JSON document.
    pub path: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `wattwise.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("wattwise.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WATTWISE_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("WATTWISE_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("WATTWISE_PLATFORM_URL") {
            self.platform.base_url = val;
        }
        if let Ok(val) = std::env::var("WATTWISE_PLATFORM_TOKEN") {
            self.platform.token = val;
        }
        // Injected automatically when running as a supervised add-on.
        if self.platform.token.is_empty()
            && let Ok(val) = std::env::var("SUPERVISOR_TOKEN")
        {
            self.platform.token = val;
        }
        if let Ok(val) = std::env::var("WATTWISE_STORAGE_PATH") {
            self.storage.path = val;
        }
        if let Ok(val) = std::env::var("WATTWISE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.control.tick_seconds == 0 {
            return Err(ConfigError::Validation(
                "control.tick_seconds must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8099,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "http://supervisor/core".to_string(),
            token: String::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "data/managed_devices.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wattwised=info,wattwise=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
