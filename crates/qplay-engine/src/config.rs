//! Configuration management for the qplay engine.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QPLAY_ prefix)
//! 3. .env files
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use qplay_adapter_sim::MAX_SUPPORTED_QUBITS;
use qplay_hal::BackendPreference;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Simulation limits and defaults
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Backend selection
    #[serde(default)]
    pub backend: BackendSection,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulation limits and defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Shots used when a request does not specify any
    #[serde(default = "default_shots")]
    pub default_shots: u32,

    /// Largest shot count a request may ask for
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,

    /// Wall-clock bound on one simulation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Statevectors are extracted only up to this many qubits
    #[serde(default = "default_statevector_max_qubits")]
    pub statevector_max_qubits: u32,

    /// Largest circuit the backend accepts
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,
}

/// Backend selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSection {
    /// Which API generation to use: "auto", "sampling" or "legacy"
    #[serde(default)]
    pub preference: BackendPreference,

    /// RNG seed for reproducible counts
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_shots() -> u32 {
    1024
}

fn default_max_shots() -> u32 {
    100_000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_statevector_max_qubits() -> u32 {
    10
}

fn default_max_qubits() -> u32 {
    20
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            default_shots: default_shots(),
            max_shots: default_max_shots(),
            timeout_secs: default_timeout_secs(),
            statevector_max_qubits: default_statevector_max_qubits(),
            max_qubits: default_max_qubits(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ExecutionConfig {
    /// The simulation deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.as_ref().display())))?;

        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Load .env file if it exists
    /// 3. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => EngineConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from `lookup`, keyed by environment variable name.
    ///
    /// Only keys that `lookup` resolves override the current values.
    /// Values that fail to parse are ignored.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Execution
        if let Some(val) = lookup("QPLAY_DEFAULT_SHOTS").and_then(|v| v.parse().ok()) {
            self.execution.default_shots = val;
        }
        if let Some(val) = lookup("QPLAY_MAX_SHOTS").and_then(|v| v.parse().ok()) {
            self.execution.max_shots = val;
        }
        if let Some(val) = lookup("QPLAY_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.execution.timeout_secs = val;
        }
        if let Some(val) = lookup("QPLAY_STATEVECTOR_MAX_QUBITS").and_then(|v| v.parse().ok()) {
            self.execution.statevector_max_qubits = val;
        }
        if let Some(val) = lookup("QPLAY_MAX_QUBITS").and_then(|v| v.parse().ok()) {
            self.execution.max_qubits = val;
        }

        // Backend
        if let Some(val) = lookup("QPLAY_BACKEND").and_then(|v| v.parse().ok()) {
            self.backend.preference = val;
        }
        if let Some(val) = lookup("QPLAY_SEED").and_then(|v| v.parse().ok()) {
            self.backend.seed = Some(val);
        }

        // Logging
        if let Some(v) = lookup("QPLAY_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("QPLAY_LOG_FORMAT") {
            self.logging.format = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let exec = &self.execution;

        if exec.max_shots == 0 {
            return Err(ConfigError::Validation(
                "max_shots must be greater than 0".to_string(),
            ));
        }
        if exec.default_shots == 0 || exec.default_shots > exec.max_shots {
            return Err(ConfigError::Validation(format!(
                "default_shots must be between 1 and max_shots ({}), got {}",
                exec.max_shots, exec.default_shots
            )));
        }
        if exec.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if exec.max_qubits == 0 || exec.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(ConfigError::Validation(format!(
                "max_qubits must be between 1 and {MAX_SUPPORTED_QUBITS}, got {}",
                exec.max_qubits
            )));
        }

        // Validate log level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        // Validate log format
        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Invalid log format: {other}"
                )));
            }
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
