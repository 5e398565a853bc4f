use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::reload::ReloadConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use crate::ForwarderConfig;

/// Main configuration structure for Ferrous Split
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub reload: ReloadConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-split.toml in current directory
    /// 3. /etc/ferrous-split/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("ferrous-split.toml").exists() {
            Self::from_file("ferrous-split.toml")?
        } else if std::path::Path::new("/etc/ferrous-split/config.toml").exists() {
            Self::from_file("/etc/ferrous-split/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(list) = overrides.domain_list {
            self.reload.domain_list = list;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Bind address must be an IP address: {}",
                self.server.bind_address
            )));
        }

        if self.reload.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Reload interval must be greater than 0".to_string(),
            ));
        }

        if self.upstream.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        self.forwarder()?;
        Ok(())
    }

    /// Parsed upstream pools.
    pub fn forwarder(&self) -> Result<ForwarderConfig, ConfigError> {
        ForwarderConfig::parse(
            &self.upstream.primary_server,
            &self.upstream.secondary_servers,
        )
        .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub domain_list: Option<String>,
    pub log_level: Option<String>,
}
