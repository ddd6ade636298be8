//! Layered CLI configuration: defaults, then `courseplan.toml`, then
//! environment, then command-line flags.

use courseplan_catalog::MemoPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "courseplan.toml";
pub const DEFAULT_CATALOG_PATH: &str = "courses.csv";
pub const DEFAULT_BENCH_ITERATIONS: usize = 5000;
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const CATALOG_ENV: &str = "COURSEPLAN_CATALOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog: String,
    pub memo_policy: MemoPolicy,
    pub bench_iterations: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG_PATH.to_string(),
            memo_policy: MemoPolicy::PerLoad,
            bench_iterations: DEFAULT_BENCH_ITERATIONS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Catalog path, preferring an explicit flag over the configured value.
    pub fn catalog_path(&self, flag: Option<&str>) -> PathBuf {
        PathBuf::from(flag.unwrap_or(&self.catalog))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Load the config file.
///
/// An explicit path must exist. The default path is optional; when it is
/// absent the built-in defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };

    let contents = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_config(&contents).map_err(|message| ConfigError::Parse {
        path: path.display().to_string(),
        message,
    })
}

pub fn parse_config(contents: &str) -> Result<Config, String> {
    toml::from_str(contents).map_err(|e| e.to_string())
}

/// Apply environment overrides through `lookup` (normally `std::env::var`).
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(catalog) = lookup(CATALOG_ENV) {
        let catalog = catalog.trim();
        if !catalog.is_empty() {
            config.catalog = catalog.to_string();
        }
    }
}
