//! Configuration module for the LSH index.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `HLSH_` and use double underscores
//! to separate nested levels:
//! - `HLSH_INDEX__NUM_TABLES=16` sets `index.num_tables`
//! - `HLSH_INDEX__SEED=42` sets `index.seed`
//! - `HLSH_LOGGING__LEVEL=debug` sets `logging.level`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::LshResult;
use crate::index::{DEFAULT_NUM_PROJECTIONS, DEFAULT_NUM_TABLES, IndexParams};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "hyperlsh.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "HLSH_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Index shape and seeding
    #[serde(default)]
    pub index: IndexConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Vector dimension
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Number of hash tables (L)
    #[serde(default = "default_num_tables")]
    pub num_tables: usize,

    /// Hyperplanes per table (K), at most 64
    #[serde(default = "default_num_projections")]
    pub num_projections: usize,

    /// Seed for reproducible projections; random when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. "info" or "hyperlsh=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Include the event target in each log line
    #[serde(default = "default_false")]
    pub show_targets: bool,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_dimension() -> usize {
    128
}
fn default_num_tables() -> usize {
    DEFAULT_NUM_TABLES
}
fn default_num_projections() -> usize {
    DEFAULT_NUM_PROJECTIONS
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_false() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            index: IndexConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            num_tables: default_num_tables(),
            num_projections: default_num_projections(),
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            show_targets: false,
        }
    }
}

impl IndexConfig {
    /// Index shape described by this configuration.
    #[must_use]
    pub fn params(&self) -> IndexParams {
        IndexParams {
            dimension: self.dimension,
            num_tables: self.num_tables,
            num_projections: self.num_projections,
        }
    }

    /// Checks that the configured shape can build an index.
    pub fn validate(&self) -> LshResult<()> {
        self.params().validate()
    }
}

impl Settings {
    /// Load configuration from defaults, `hyperlsh.toml` in the current
    /// directory (if present) and `HLSH_` environment variables.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::load_from(PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load configuration from a specific file, still honouring environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path))
            // Double underscore separates nested levels, single underscores stay in field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
