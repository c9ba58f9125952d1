//! Logging setup for the RPC gateway.
//!
//! This module provides:
//!
//! - **Logging initialization**: install the global tracing subscriber with
//!   the configured level and output format
//! - **Dynamic log level changes**: adjust levels at runtime through the
//!   `/ll` admin endpoint, globally or per partition
//!
//! # Log Formats
//!
//! - **Text** ([`LogFormat::Text`]): human-readable, optionally colored
//! - **JSON** ([`LogFormat::Json`]): one JSON object per line for log
//!   aggregation
//!
//! # Example
//!
//! ```no_run
//! use soroban_rpc_app::logging::{init_with_handle, LogConfig};
//!
//! let handle = init_with_handle(&LogConfig::default()).expect("logging");
//! handle.set_level("DEBUG").ok();
//! handle.set_partition_level("Core", "TRACE").ok();
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::Level;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Log output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text format with optional ANSI colors.
    #[default]
    Text,
    /// Structured JSON format for machine parsing.
    Json,
}

impl LogFormat {
    /// Parses a format name as written in the config file.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Logging configuration options.
///
/// - [`LogConfig::default()`] - INFO level, text format, colors enabled
/// - [`LogConfig::verbose()`] - DEBUG level with source locations
/// - [`LogConfig::json()`] - JSON output for production
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level to output.
    pub level: Level,
    /// Output format (text or JSON).
    pub format: LogFormat,
    /// Enable ANSI color codes (text format only).
    pub ansi_colors: bool,
    /// Include file/line source locations in output.
    pub with_source_location: bool,
    /// Include thread IDs in output.
    pub with_thread_ids: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Text,
            ansi_colors: true,
            with_source_location: false,
            with_thread_ids: false,
        }
    }
}

impl LogConfig {
    /// Create a verbose debug configuration.
    pub fn verbose() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Text,
            ansi_colors: true,
            with_source_location: true,
            with_thread_ids: true,
        }
    }

    /// Create a JSON logging configuration.
    pub fn json() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Json,
            ansi_colors: false,
            with_source_location: true,
            with_thread_ids: true,
        }
    }

    /// Set the log level from a string. Unknown names fall back to INFO.
    pub fn with_level(mut self, level: &str) -> Self {
        self.level = match level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        self
    }
}

/// Log partitions and the crate targets they filter.
pub const LOG_PARTITIONS: &[(&str, &str)] = &[
    ("Rpc", "soroban_rpc_app"),
    ("Tx", "soroban_rpc_tx"),
    ("Core", "soroban_rpc_core_client"),
    ("Crypto", "soroban_rpc_crypto"),
];

/// Handle for changing log levels at runtime.
#[derive(Clone)]
pub struct LogLevelHandle {
    handle: Arc<Handle<EnvFilter, Registry>>,
    /// Partition name -> level.
    levels: Arc<RwLock<HashMap<String, String>>>,
    global_level: Arc<RwLock<String>>,
}

impl std::fmt::Debug for LogLevelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogLevelHandle")
            .field("global_level", &*self.global_level.read())
            .finish_non_exhaustive()
    }
}

impl LogLevelHandle {
    fn new(handle: Handle<EnvFilter, Registry>, initial_level: &str) -> Self {
        let levels = LOG_PARTITIONS
            .iter()
            .map(|(partition, _)| (partition.to_string(), initial_level.to_string()))
            .collect();
        Self {
            handle: Arc::new(handle),
            levels: Arc::new(RwLock::new(levels)),
            global_level: Arc::new(RwLock::new(initial_level.to_string())),
        }
    }

    /// Set the global log level, resetting every partition to it.
    pub fn set_level(&self, level: &str) -> anyhow::Result<()> {
        let level = normalize_level(level)?;
        self.handle.reload(base_filter(&level)?)?;
        *self.global_level.write() = level.clone();
        let mut levels = self.levels.write();
        for (partition, _) in LOG_PARTITIONS {
            levels.insert(partition.to_string(), level.clone());
        }
        Ok(())
    }

    /// Set the log level for a single partition.
    pub fn set_partition_level(&self, partition: &str, level: &str) -> anyhow::Result<()> {
        let level = normalize_level(level)?;
        let (name, target) = find_partition(partition)
            .ok_or_else(|| anyhow::anyhow!("Unknown partition: {}", partition))?;

        self.levels.write().insert(name.to_string(), level.clone());
        self.handle.reload(self.build_filter_with_partitions()?)?;

        tracing::debug!(partition = %name, target = %target, level = %level, "Updated partition log level");
        Ok(())
    }

    /// Current levels for every partition plus `Global`.
    pub fn get_levels(&self) -> HashMap<String, String> {
        let mut result = self.levels.read().clone();
        result.insert("Global".to_string(), self.global_level.read().clone());
        result
    }

    fn build_filter_with_partitions(&self) -> anyhow::Result<EnvFilter> {
        let global = self.global_level.read().clone();
        let mut filter = base_filter(&global)?;

        for (partition, level) in self.levels.read().iter() {
            if level == &global {
                continue;
            }
            if let Some((_, target)) = find_partition(partition) {
                filter = filter.add_directive(format!("{}={}", target, level).parse()?);
            }
        }

        Ok(filter)
    }
}

/// Filter at `level` with the HTTP stack held at warn.
fn base_filter(level: &str) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::new(level)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("h2=warn".parse()?))
}

/// Normalize a log level string to its lowercase canonical form.
fn normalize_level(level: &str) -> anyhow::Result<String> {
    match level.to_uppercase().as_str() {
        "TRACE" => Ok("trace".to_string()),
        "DEBUG" => Ok("debug".to_string()),
        "INFO" => Ok("info".to_string()),
        "WARN" | "WARNING" => Ok("warn".to_string()),
        "ERROR" => Ok("error".to_string()),
        _ => Err(anyhow::anyhow!("Invalid log level: {}", level)),
    }
}

fn find_partition(partition: &str) -> Option<(&'static str, &'static str)> {
    LOG_PARTITIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(partition))
        .copied()
}

/// Initialize the global logging subscriber.
///
/// Call once at startup. Use [`init_with_handle`] to keep the ability to
/// change levels later.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let _ = init_with_handle(config)?;
    Ok(())
}

/// Initialize the global logging subscriber and return a reload handle.
///
/// Output goes to stderr. `RUST_LOG`, when set, takes precedence over
/// `config.level`.
pub fn init_with_handle(config: &LogConfig) -> anyhow::Result<LogLevelHandle> {
    let initial_level = config.level.as_str().to_lowercase();
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => base_filter(&initial_level)?,
    };
    let (filter, reload_handle) = tracing_subscriber::reload::Layer::new(env_filter);

    match config.format {
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi_colors)
                .with_target(true)
                .with_thread_ids(config.with_thread_ids)
                .with_file(config.with_source_location)
                .with_line_number(config.with_source_location);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_thread_ids(config.with_thread_ids)
                .with_file(config.with_source_location)
                .with_line_number(config.with_source_location)
                .with_span_list(true)
                .with_current_span(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(LogLevelHandle::new(reload_handle, &initial_level))
}
