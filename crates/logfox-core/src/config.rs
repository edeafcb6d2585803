//! Configuration management for LogFox.
//!
//! This module provides multi-layer configuration support with:
//! - File-based configuration (YAML)
//! - Environment variable overrides (`LOGFOX_*`)
//! - Programmatic updates
//!
//! ## Configuration Layers
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables
//! 2. Programmatically set values
//! 3. Values loaded from file
//! 4. Default values
//!
//! ## Example
//!
//! ```rust,no_run
//! use logfox_core::config::Config;
//!
//! let mut config = Config::load(Config::default_path()?)?.with_env_overrides()?;
//!
//! // Force the viewer hotkey for this run
//! config.set("viewer.hotkey", "F9")?;
//!
//! let settings = config.settings()?;
//! assert_eq!(settings.viewer.hotkey.to_string(), "F9");
//! # Ok::<(), logfox_core::LogFoxError>(())
//! ```

use crate::util::data::{deep_merge, get_path, set_path};
use logfox_types::{Hotkey, LogFoxError, LogFoxSettings, Markup, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    Loaded = 1,
    /// Values set programmatically
    Set = 2,
    /// Values from environment variables
    Environment = 3,
}

impl ConfigLayer {
    const LOWEST_FIRST: [ConfigLayer; 4] = [
        ConfigLayer::Default,
        ConfigLayer::Loaded,
        ConfigLayer::Set,
        ConfigLayer::Environment,
    ];
}

/// Environment variables and the dotted keys they override.
pub const ENV_OVERRIDES: [(&str, &str); 5] = [
    ("LOGFOX_FILE_LOGGING", "file_logging.enabled"),
    ("LOGFOX_DEBUG", "debug_mode"),
    ("LOGFOX_MARKUP", "markup"),
    ("LOGFOX_TIME_FORMAT", "time_format"),
    ("LOGFOX_VIEWER_HOTKEY", "viewer.hotkey"),
];

/// Layered configuration store.
#[derive(Clone, Debug)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// Create a configuration holding only the defaults.
    pub fn new() -> Self {
        let mut layers = HashMap::new();
        // Serializing plain data structs cannot fail.
        if let Ok(defaults) = serde_json::to_value(LogFoxSettings::default()) {
            layers.insert(ConfigLayer::Default, defaults);
        }

        Self {
            layers,
            file_path: None,
        }
    }

    /// Create a new configuration from a file path.
    ///
    /// If the file doesn't exist, only the defaults are present.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::new();

        // Load file if it exists
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| LogFoxError::Config(format!("Failed to read config file: {}", e)))?;

            let value: Value = serde_yaml::from_str(&content)
                .map_err(|e| LogFoxError::Config(format!("Failed to parse config: {}", e)))?;

            // An empty document parses as null.
            if !value.is_null() {
                config.layers.insert(ConfigLayer::Loaded, value);
            }
            tracing::debug!(path = %path.display(), "configuration loaded");
        }

        config.file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply `LOGFOX_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_env_from(std::env::vars())
    }

    /// Apply `LOGFOX_*` overrides from an explicit variable list.
    pub fn with_env_from<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut layer = Value::Object(Default::default());
        let mut touched = false;

        for (name, raw) in vars {
            let Some((_, key)) = ENV_OVERRIDES.iter().find(|(var, _)| *var == name.as_ref()) else {
                continue;
            };
            let value = env_value(name.as_ref(), key, raw.as_ref())?;
            set_path(&mut layer, key, value)?;
            touched = true;
        }

        if touched {
            self.layers.insert(ConfigLayer::Environment, layer);
        }
        Ok(self)
    }

    /// Set a configuration value programmatically.
    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| LogFoxError::Config(format!("Failed to serialize value: {}", e)))?;

        let set_layer = self
            .layers
            .entry(ConfigLayer::Set)
            .or_insert(Value::Object(Default::default()));

        set_path(set_layer, key, value)
    }

    /// Resolve the typed settings from all layers.
    pub fn settings(&self) -> Result<LogFoxSettings> {
        serde_json::from_value(self.merged_data())
            .map_err(|e| LogFoxError::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Path this configuration was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get the default path for the configuration file (`~/.logfox/config`).
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".logfox").join("config"))
            .ok_or_else(|| LogFoxError::Config("Could not determine home directory".to_string()))
    }

    /// Get merged data from all layers.
    fn merged_data(&self) -> Value {
        let mut merged = Value::Object(serde_json::Map::new());

        for layer in &ConfigLayer::LOWEST_FIRST {
            if let Some(layer_data) = self.layers.get(layer) {
                merged = deep_merge(merged, layer_data.clone());
            }
        }

        merged
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

// Validate an override and convert it to the JSON shape its key expects.
fn env_value(name: &str, key: &str, raw: &str) -> Result<Value> {
    let invalid = |what: &str| {
        LogFoxError::Config(format!("Invalid {} in {}: '{}'", what, name, raw))
    };

    match key {
        "file_logging.enabled" | "debug_mode" => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| invalid("boolean")),
        "markup" => raw
            .parse::<Markup>()
            .map(|markup| Value::String(markup.to_string()))
            .map_err(|_| invalid("markup")),
        "viewer.hotkey" => raw
            .parse::<Hotkey>()
            .map(|key| Value::String(key.to_string()))
            .map_err(|_| invalid("hotkey")),
        "time_format" => {
            crate::time::validate_format(raw)?;
            Ok(Value::String(raw.to_string()))
        }
        _ => Ok(Value::String(raw.to_string())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
