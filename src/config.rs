//! Configuration module
//!
//! TOML file with one table per concern. Every field has a default, so an
//! empty or partial file is valid.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! storage = "sqlite"
//! url = "sqlite://./vehicles.db?mode=rwc"
//!
//! [clients]
//! pricing_url = "http://localhost:8082"
//! maps_mode = "static"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::errors::InfraError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub clients: ClientsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which car repository backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub storage: StorageKind,
    /// Ignored when `storage = "memory"`
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            storage: StorageKind::Sqlite,
            url: "sqlite://./vehicles.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. `info` or `vehicles=debug,sea_orm=warn`
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Where addresses come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapsMode {
    /// Call the maps service at `maps_url`
    Http,
    /// Answer every lookup with one fixed address
    Static,
    /// Never resolve an address
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientsConfig {
    pub pricing_url: String,
    pub maps_url: String,
    pub maps_mode: MapsMode,
    /// Per-request timeout for both lookups
    pub timeout_ms: u64,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            pricing_url: "http://localhost:8082".to_string(),
            maps_url: "http://localhost:9191".to_string(),
            maps_mode: MapsMode::Static,
            timeout_ms: 2000,
        }
    }
}

impl AppConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| InfraError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        let config: Self = toml::from_str(raw).map_err(|e| InfraError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), InfraError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| InfraError::Config(format!("cannot create {}: {}", parent.display(), e)))?;
        }
        let raw = toml::to_string_pretty(self).map_err(|e| InfraError::Config(e.to_string()))?;
        std::fs::write(path, raw)
            .map_err(|e| InfraError::Config(format!("cannot write {}: {}", path.display(), e)))
    }

    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<(), InfraError> {
        if self.server.port == 0 {
            return Err(InfraError::Config("server.port must not be 0".into()));
        }
        if self.clients.timeout_ms == 0 {
            return Err(InfraError::Config("clients.timeout_ms must be positive".into()));
        }
        if !is_http_url(&self.clients.pricing_url) {
            return Err(InfraError::Config(format!(
                "clients.pricing_url is not an http(s) URL: {}",
                self.clients.pricing_url
            )));
        }
        if self.clients.maps_mode == MapsMode::Http && !is_http_url(&self.clients.maps_url) {
            return Err(InfraError::Config(format!(
                "clients.maps_url is not an http(s) URL: {}",
                self.clients.maps_url
            )));
        }
        if self.database.storage == StorageKind::Sqlite && !self.database.url.starts_with("sqlite:") {
            return Err(InfraError::Config(format!(
                "database.url must be a sqlite URL: {}",
                self.database.url
            )));
        }
        Ok(())
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// `<config dir>/vehicles-service/config.toml`, e.g.
/// `~/.config/vehicles-service/config.toml` on Linux.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vehicles-service")
        .join("config.toml")
}
