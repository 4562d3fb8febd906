//! Configuration loading
//!
//! Resolves the configuration file, parses it as TOML and validates the
//! result. Falls back to the embedded defaults when no file is present.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::*;

use thermoplate_core::config::{InvalidConfig, PlateConfig};

/// Embedded default configuration
/// Edit thermoplate.toml and rebuild to change the built-in defaults
const EMBEDDED_CONFIG: &str = include_str!("../thermoplate.toml");

/// System-wide configuration file, used when no path is given
pub const SYSTEM_CONFIG_PATH: &str = "/etc/thermoplate.toml";

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(PathBuf, io::Error),
    /// TOML syntax or type error
    Parse(toml::de::Error),
    /// Parsed, but values are out of range
    Invalid(InvalidConfig),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "reading {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "parsing configuration: {}", e),
            ConfigError::Invalid(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<InvalidConfig> for ConfigError {
    fn from(e: InvalidConfig) -> Self {
        ConfigError::Invalid(e)
    }
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<PlateConfig, ConfigError> {
    let config: PlateConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration
///
/// An explicit path must exist. Without one, the system file is used if
/// present, otherwise the embedded defaults.
pub fn load(explicit: Option<&Path>) -> Result<PlateConfig, ConfigError> {
    if let Some(path) = explicit {
        info!("Loading configuration from {}", path.display());
        return load_file(path);
    }

    let system = Path::new(SYSTEM_CONFIG_PATH);
    if system.exists() {
        info!("Loading configuration from {}", system.display());
        return load_file(system);
    }

    info!("No configuration file, using embedded defaults");
    parse_config(EMBEDDED_CONFIG)
}

fn load_file(path: &Path) -> Result<PlateConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    parse_config(&text)
}
