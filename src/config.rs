//! Persisted configuration
//!
//! Reads and manages user settings from `config.toml` in the user config
//! directory: the current auth context (`prod`/`dev`), the default region and
//! output format, and the session token stored per context.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_ENV: &str = "prod";
pub const DEFAULT_REGION: &str = "bregenz.a1";
pub const DEFAULT_OUTPUT_FMT: &str = "table";

/// Persisted configuration for strato
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current auth context, selecting the control-plane environment
    #[serde(default = "default_env")]
    pub env: String,

    /// Default region commands are run against
    #[serde(default = "default_region")]
    pub region: String,

    /// Default output format
    #[serde(default = "default_output_fmt")]
    pub output_fmt: String,

    /// Per-context state, keyed by context name
    #[serde(default)]
    pub contexts: BTreeMap<String, ContextConfig>,
}

/// State stored per auth context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Session token obtained via `strato login`
    #[serde(default)]
    pub token: String,
}

fn default_env() -> String {
    DEFAULT_ENV.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_output_fmt() -> String {
    DEFAULT_OUTPUT_FMT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: default_env(),
            region: default_region(),
            output_fmt: default_output_fmt(),
            contexts: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Path of the config file in the user config directory
    pub fn path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("strato").join("config.toml"))
    }

    /// Load the configuration, falling back to defaults if no file exists
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load the configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Write the configuration to the user config directory
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Write the configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |e: String| ConfigError::WriteError {
            path: path.to_path_buf(),
            error: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        fs::write(path, content).map_err(|e| write_error(e.to_string()))
    }

    /// Session token of the given context, if one is stored
    pub fn token(&self, env: &str) -> Option<&str> {
        self.contexts
            .get(env)
            .map(|context| context.token.as_str())
            .filter(|token| !token.is_empty())
    }

    pub fn set_token(&mut self, env: &str, token: String) {
        self.contexts.entry(env.to_string()).or_default().token = token;
    }

    pub fn clear_token(&mut self, env: &str) {
        if let Some(context) = self.contexts.get_mut(env) {
            context.token.clear();
        }
    }

    /// Read one of the user-facing settings by name
    pub fn get(&self, setting: &str) -> Option<&str> {
        match setting {
            "env" => Some(&self.env),
            "region" => Some(&self.region),
            "output-fmt" => Some(&self.output_fmt),
            _ => None,
        }
    }
}
