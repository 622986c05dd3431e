//! Main application configuration
//!
//! Configuration comes from environment variables with sensible defaults;
//! the CLI applies its overrides on top before validation.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub store: StoreSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Host to bind the HTTP server to
    pub bind_address: String,
    /// Port for the HTTP server
    pub http_port: u16,
}

/// Backing store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Directory for the durable key-value store; unset means the
    /// in-memory fallback (no durability across restarts)
    pub data_dir: Option<PathBuf>,
    /// Optional JSON file replacing the built-in seed dataset
    pub seed_file: Option<PathBuf>,
    /// Shared token guarding the admin endpoints; unset disables them
    pub admin_token: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "community-duel".to_string(),
            log_level: "info".to_string(),
            bind_address: "0.0.0.0".to_string(),
            http_port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(addr) = env::var("BIND_ADDRESS") {
            config.service.bind_address = addr;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            config.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }

        if let Ok(dir) = env::var("STORE_DATA_DIR") {
            config.store.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(seed) = env::var("SEED_FILE") {
            config.store.seed_file = Some(PathBuf::from(seed));
        }
        if let Ok(token) = env::var("ADMIN_TOKEN") {
            config.store.admin_token = Some(token);
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate a configuration, rejecting values the service cannot run with
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    match config.service.log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        other => return Err(anyhow!("Invalid log level: {}", other)),
    }

    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }

    if let Some(token) = &config.store.admin_token {
        if token.len() < 8 {
            return Err(anyhow!("Admin token must be at least 8 characters"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.service.http_port, 8080);
        assert!(config.store.data_dir.is_none());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut config = AppConfig::default();
        config.service.log_level = "verbose".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut config = AppConfig::default();
        config.service.http_port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn short_admin_token_is_rejected() {
        let mut config = AppConfig::default();
        config.store.admin_token = Some("short".to_string());
        assert!(validate_config(&config).is_err());
    }
}
