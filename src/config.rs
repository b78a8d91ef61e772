//! Configuration stored in `~/.kern/config.toml`.
//!
//! Every field is optional in the file; missing ones take defaults. A few
//! environment variables override the file:
//!
//! - `KERN_CONFIG`: alternate config path
//! - `KERN_MAX_DEPTH`: recursion limit
//! - `KERN_BANNER=1`: show the startup banner

use crate::eval::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Deepest nesting of function calls before RecursionLimit
    pub max_depth: usize,

    /// REPL history; `None` disables it
    pub history_file: Option<PathBuf>,

    /// Forms run when the REPL starts
    pub prelude: Option<PathBuf>,

    /// Print the banner on REPL start
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        let home = home_dir();
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            history_file: home.as_ref().map(|h| h.join(".kern_history")),
            prelude: home.as_ref().map(|h| h.join(".kernrc")),
            banner: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be > 0".into()));
        }
        Ok(())
    }

    /// Resolve the config path, load it and apply environment overrides.
    ///
    /// Never fails: a broken config file is logged and defaults are used.
    pub fn load() -> Config {
        let path = env::var_os("KERN_CONFIG")
            .map(PathBuf::from)
            .or_else(|| home_dir().map(|h| h.join(".kern").join("config.toml")));

        let mut config = match path {
            Some(path) => load_config(&path).unwrap_or_else(|e| {
                warn!(error = %e, "falling back to default config");
                Config::default()
            }),
            None => Config::default(),
        };
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Some(depth) = env::var("KERN_MAX_DEPTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|d| *d > 0)
        {
            self.max_depth = depth;
        }
        if env::var("KERN_BANNER").map(|v| v == "1").unwrap_or(false) {
            self.banner = true;
        }
    }
}

pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}
