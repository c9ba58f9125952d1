//! Configuration loading and validation for the RPC gateway.
//!
//! Configuration comes from a TOML file, then environment overrides
//! (prefixed with `SOROBAN_RPC_`), then validation.
//!
//! # Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | `network` | Network passphrase used for contract id derivation |
//! | `core` | Simulation backend URL and per-request deadline |
//! | `http` | JSON-RPC listen address and port |
//! | `logging` | Log level, format, and colors |
//!
//! # Example Configuration
//!
//! ```toml
//! [network]
//! passphrase = "Test SDF Network ; September 2015"
//!
//! [core]
//! url = "http://127.0.0.1:11626"
//! timeout_ms = 10000
//!
//! [http]
//! address = "0.0.0.0"
//! port = 8000
//! ```
//!
//! # Environment Overrides
//!
//! - `SOROBAN_RPC_NETWORK_PASSPHRASE` - Network passphrase
//! - `SOROBAN_RPC_CORE_URL` - Backend base URL
//! - `SOROBAN_RPC_CORE_TIMEOUT_MS` - Backend deadline in milliseconds
//! - `SOROBAN_RPC_HTTP_ADDRESS` - Listen address
//! - `SOROBAN_RPC_HTTP_PORT` - Listen port
//! - `SOROBAN_RPC_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
//! - `SOROBAN_RPC_LOG_FORMAT` - Log format (text, json)

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use soroban_rpc_common::network::{
    FUTURENET_PASSPHRASE, STANDALONE_PASSPHRASE, TESTNET_PASSPHRASE,
};
use soroban_rpc_common::NetworkId;
use url::Url;

use crate::logging::{LogConfig, LogFormat};

/// Main gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Network settings.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Simulation backend settings.
    #[serde(default)]
    pub core: CoreConfig,

    /// JSON-RPC server settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network passphrase; its SHA-256 is the network id.
    #[serde(default = "default_passphrase")]
    pub passphrase: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            passphrase: default_passphrase(),
        }
    }
}

fn default_passphrase() -> String {
    STANDALONE_PASSPHRASE.to_string()
}

/// Simulation backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Base URL of the core instance; requests go to `<url>/preflight`.
    #[serde(default = "default_core_url")]
    pub url: String,

    /// Deadline for one simulation request, in milliseconds.
    #[serde(default = "default_core_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            url: default_core_url(),
            timeout_ms: default_core_timeout_ms(),
        }
    }
}

impl CoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_core_url() -> String {
    "http://127.0.0.1:11626".to_string()
}

fn default_core_timeout_ms() -> u64 {
    10_000
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Address to bind the JSON-RPC server to.
    #[serde(default = "default_http_address")]
    pub address: String,

    /// Port for the JSON-RPC server.
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: default_http_address(),
            port: default_http_port(),
        }
    }
}

impl HttpConfig {
    /// The socket address the server listens on.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.address, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid http address {}: {}", self.address, e))?;
        Ok(addr)
    }
}

fn default_http_address() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text or json).
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to use ANSI colors.
    #[serde(default = "default_true")]
    pub colors: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colors: true,
        }
    }
}

impl LoggingConfig {
    /// Converts the file settings into a subscriber configuration.
    pub fn to_log_config(&self) -> LogConfig {
        let base = match LogFormat::parse(&self.format) {
            Some(LogFormat::Json) => LogConfig::json(),
            _ => LogConfig::default(),
        };
        let mut config = base.with_level(&self.level);
        config.ansi_colors = config.ansi_colors && self.colors;
        config
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Configuration for a local standalone network.
    pub fn standalone() -> Self {
        Self::default()
    }

    /// Configuration for the public testnet.
    pub fn testnet() -> Self {
        Self {
            network: NetworkConfig {
                passphrase: TESTNET_PASSPHRASE.to_string(),
            },
            ..Self::default()
        }
    }

    /// Configuration for futurenet.
    pub fn futurenet() -> Self {
        Self {
            network: NetworkConfig {
                passphrase: FUTURENET_PASSPHRASE.to_string(),
            },
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Environment variables take precedence over file configuration.
    pub fn from_file_with_env(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SOROBAN_RPC_NETWORK_PASSPHRASE") {
            self.network.passphrase = val;
        }

        if let Ok(val) = std::env::var("SOROBAN_RPC_CORE_URL") {
            self.core.url = val;
        }
        if let Ok(val) = std::env::var("SOROBAN_RPC_CORE_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.core.timeout_ms = ms;
            }
        }

        if let Ok(val) = std::env::var("SOROBAN_RPC_HTTP_ADDRESS") {
            self.http.address = val;
        }
        if let Ok(val) = std::env::var("SOROBAN_RPC_HTTP_PORT") {
            if let Ok(port) = val.parse() {
                self.http.port = port;
            }
        }

        if let Ok(val) = std::env::var("SOROBAN_RPC_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("SOROBAN_RPC_LOG_FORMAT") {
            self.logging.format = val;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.network.passphrase.is_empty() {
            anyhow::bail!("network.passphrase must not be empty");
        }

        let url = Url::parse(&self.core.url)
            .map_err(|e| anyhow::anyhow!("Invalid core.url {}: {}", self.core.url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("core.url must use http or https, got {}", url.scheme());
        }
        if self.core.timeout_ms == 0 {
            anyhow::bail!("core.timeout_ms must be > 0");
        }

        self.http.socket_addr()?;

        if LogFormat::parse(&self.logging.format).is_none() {
            anyhow::bail!(
                "logging.format must be text or json, got {}",
                self.logging.format
            );
        }
        Ok(())
    }

    /// Get the network ID hash.
    pub fn network_id(&self) -> NetworkId {
        NetworkId::from_passphrase(&self.network.passphrase)
    }

    /// Generate a sample configuration file.
    pub fn sample_config() -> String {
        toml::to_string_pretty(&Self::standalone()).unwrap_or_default()
    }
}
