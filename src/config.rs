/// TOML configuration loading.
///
/// All settings are optional — a missing file at the default location means
/// defaults, but an explicitly requested file that cannot be read or parsed
/// is an error. Command-line arguments override anything set here.
///
/// ```toml
/// data_file = "measurements.txt"
/// log_file = "aquamon.log"
/// log_level = "debug"
/// ```

use crate::logging::LogLevel;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "aquamon.toml";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Measurement file to load when none is given on the command line.
    pub data_file: Option<String>,
    /// Append-only log file; console-only logging when unset.
    pub log_file: Option<String>,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;
        toml::from_str(&text)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Loads the default config file if present, defaults otherwise.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolves the configured log level, defaulting to Info. Unknown names
    /// fall back to Info rather than failing the run.
    pub fn min_log_level(&self) -> LogLevel {
        match self.log_level.as_deref() {
            Some("debug") => LogLevel::Debug,
            Some("warn") | Some("warning") => LogLevel::Warning,
            Some("error") => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    Io(String, String),
    /// The file is not valid TOML or has unknown fields.
    Parse(String, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, msg) => {
                write!(f, "cannot read config file {}: {}", path, msg)
            }
            ConfigError::Parse(path, msg) => {
                write!(f, "invalid config file {}: {}", path, msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
