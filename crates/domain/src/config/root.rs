use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::cache::CacheConfig;
use super::dns::{DnsConfig, ResolutionMode};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

/// Main configuration structure for Sluice DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (ports, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolution configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// Record store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sluice-dns.toml in current directory
    /// 3. /etc/sluice-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("sluice-dns.toml").exists() {
            Self::from_file("sluice-dns.toml")?
        } else if std::path::Path::new("/etc/sluice-dns/config.toml").exists() {
            Self::from_file("/etc/sluice-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.udp_port {
            self.server.udp_port = port;
        }
        if let Some(port) = overrides.tcp_port {
            self.server.tcp_port = port;
        }
        if let Some(port) = overrides.doh_port {
            self.server.doh_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(mode) = overrides.mode {
            self.dns.mode = mode;
        }
        if let Some(upstream) = overrides.upstream {
            self.dns.upstream = upstream;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.udp_port == 0 || self.server.tcp_port == 0 || self.server.doh_port == 0 {
            return Err(ConfigError::Validation("Listener ports cannot be 0".to_string()));
        }

        if self.dns.resolve_timeout_ms == 0 || self.dns.upstream_timeout_ms == 0 {
            return Err(ConfigError::Validation("Timeouts must be positive".to_string()));
        }

        if self.cache.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Cache sweep interval must be positive".to_string(),
            ));
        }

        match self.dns.mode {
            ResolutionMode::Forward => {
                self.upstream_addr()?;
            }
            ResolutionMode::Recursive => {
                let recursion = &self.dns.recursion;
                if recursion.root_servers.is_empty() {
                    return Err(ConfigError::Validation(
                        "No root servers configured".to_string(),
                    ));
                }
                if recursion.max_rounds == 0 {
                    return Err(ConfigError::Validation(
                        "Recursion needs at least one round".to_string(),
                    ));
                }
                if recursion.exchange_timeout_ms == 0 {
                    return Err(ConfigError::Validation("Timeouts must be positive".to_string()));
                }
            }
        }

        Ok(())
    }

    /// Parsed upstream address for forward mode
    pub fn upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.dns.upstream.parse().map_err(|_| {
            ConfigError::Validation(format!("Invalid upstream address: {}", self.dns.upstream))
        })
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub udp_port: Option<u16>,
    pub tcp_port: Option<u16>,
    pub doh_port: Option<u16>,
    pub bind_address: Option<String>,
    pub mode: Option<ResolutionMode>,
    pub upstream: Option<String>,
    pub log_level: Option<String>,
}
