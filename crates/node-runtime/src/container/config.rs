//! # Node Configuration
//!
//! Runtime parameters for the directory node. Every field has a default;
//! `RD_*` environment variables override them.
//!
//! ## Consistency Requirements
//!
//! - Freshness window and sweep interval are non-zero
//! - Retention is at least the freshness window

use rd_01_entry_validation::{MessageFraming, ValidatorConfig, DEFAULT_FRESHNESS_WINDOW_MS};
use rd_02_record_store::{SweeperConfig, DEFAULT_RETENTION};
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// HTTP listener.
    pub http: HttpConfig,
    /// Record storage.
    pub storage: StorageConfig,
    /// Entry validation.
    pub validation: ValidationConfig,
    /// Expiry sweep.
    pub expiry: ExpiryConfig,
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `RD_*`
    /// variable. Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(port) = parse_var(&lookup, "RD_HTTP_PORT") {
            config.http.port = port;
        }
        if let Some(addr) = parse_var(&lookup, "RD_BIND_ADDR") {
            config.http.bind_addr = addr;
        }
        if let Some(backend) = parse_var(&lookup, "RD_STORAGE") {
            config.storage.backend = backend;
        }
        if let Some(dir) = lookup("RD_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(window) = parse_var(&lookup, "RD_FRESHNESS_MS") {
            config.validation.freshness_window_ms = window;
        }
        if let Some(framing) = parse_var::<MessageFraming>(&lookup, "RD_FRAMING") {
            info!(framing = %framing, "Using configured message framing");
            config.validation.framing = framing;
        }
        if let Some(secs) = parse_var(&lookup, "RD_RETENTION_SECS") {
            config.expiry.retention = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var(&lookup, "RD_SWEEP_INTERVAL_SECS") {
            config.expiry.interval = Duration::from_secs(secs);
        }

        config
    }

    /// Check the settings are mutually consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.freshness_window_ms == 0 {
            return Err(ConfigError::ZeroFreshnessWindow);
        }
        if self.expiry.interval.is_zero() {
            return Err(ConfigError::ZeroSweepInterval);
        }
        let window = Duration::from_millis(self.validation.freshness_window_ms);
        if self.expiry.retention < window {
            return Err(ConfigError::RetentionShorterThanWindow {
                retention_secs: self.expiry.retention.as_secs(),
                window_ms: self.validation.freshness_window_ms,
            });
        }
        Ok(())
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(var = name, value = %raw, error = %e, "Ignoring invalid setting");
            None
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Freshness window must be non-zero (RD_FRESHNESS_MS)")]
    ZeroFreshnessWindow,

    #[error("Sweep interval must be non-zero (RD_SWEEP_INTERVAL_SECS)")]
    ZeroSweepInterval,

    #[error("Retention ({retention_secs}s) is shorter than the freshness window ({window_ms}ms)")]
    RetentionShorterThanWindow { retention_secs: u64, window_ms: u64 },
}

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Listening port.
    pub port: u16,
    /// Interface to bind.
    pub bind_addr: IpAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8787,
            bind_addr: IpAddr::from([0, 0, 0, 0]),
        }
    }
}

/// Where live records are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory; lost on restart.
    #[default]
    Memory,
    /// RocksDB under `data_dir`. Needs the `rocksdb` feature.
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(StorageBackend::Memory),
            "rocksdb" => Ok(StorageBackend::RocksDb),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Backend selection.
    pub backend: StorageBackend,
    /// Data directory for the persistent backend.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data/roster"),
        }
    }
}

/// Entry validation configuration.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// How far behind "now" a body timestamp may be, in milliseconds.
    pub freshness_window_ms: u64,
    /// How signed message parts are joined.
    pub framing: MessageFraming,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: DEFAULT_FRESHNESS_WINDOW_MS,
            framing: MessageFraming::default(),
        }
    }
}

impl From<&ValidationConfig> for ValidatorConfig {
    fn from(config: &ValidationConfig) -> Self {
        ValidatorConfig {
            freshness_window_ms: config.freshness_window_ms,
            framing: config.framing,
        }
    }
}

/// Expiry sweep configuration.
#[derive(Debug, Clone)]
pub struct ExpiryConfig {
    /// Age past which records are removed.
    pub retention: Duration,
    /// Time between sweeps.
    pub interval: Duration,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            retention: DEFAULT_RETENTION,
            interval: Duration::from_secs(60),
        }
    }
}

impl From<&ExpiryConfig> for SweeperConfig {
    fn from(config: &ExpiryConfig) -> Self {
        SweeperConfig {
            retention: config.retention,
            interval: config.interval,
        }
    }
}
