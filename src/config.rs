//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/algokit/algokit.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `ALGOKIT__*` prefix (`ALGOKIT__DP__STRATEGY=memoized`)
//!
//! Settings only pick default strategies for [`crate::toolkit::Toolkit`]; they are plain values
//! handed to it explicitly and never cached process-wide.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::dp::DpStrategy;
use crate::errors::{PatternError, PatternResult};
use crate::tree::Strategy;
use crate::window::Aggregate;

/// Tree traversal settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TraversalConfig {
    /// Evaluation of depth-first orders (default: iterative)
    pub strategy: Strategy,
}

/// Dynamic programming settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DpConfig {
    /// Evaluation of catalogue recurrences (default: rolling)
    pub strategy: DpStrategy,
}

/// Sliding window settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowConfig {
    /// Aggregate for fixed windows (default: sum)
    pub aggregate: Aggregate,
}

/// Unified configuration for algokit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub traversal: TraversalConfig,
    pub dp: DpConfig,
    pub window: WindowConfig,
}

/// Get the XDG config directory for algokit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "algokit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("algokit.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist if given
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> PatternResult<Self> {
        let mut builder = Self::defaults_builder()?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "global config");
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("ALGOKIT").separator("__"));

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Parse settings from TOML text on top of the compiled defaults.
    pub fn from_toml(content: &str) -> PatternResult<Self> {
        toml::from_str(content).map_err(|e| PatternError::Config {
            message: format!("parse settings: {e}"),
        })
    }

    fn defaults_builder() -> PatternResult<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Settings::default();
        Config::builder()
            .set_default("traversal.strategy", scalar(&defaults.traversal.strategy)?)
            .map_err(config_err)?
            .set_default("dp.strategy", scalar(&defaults.dp.strategy)?)
            .map_err(config_err)?
            .set_default("window.aggregate", scalar(&defaults.window.aggregate)?)
            .map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> PatternResult<String> {
        toml::to_string_pretty(self).map_err(|e| PatternError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# algokit configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/algokit/algokit.toml
#   File:   path passed to Settings::load
#   Env:    ALGOKIT__<SECTION>__<KEY>, e.g. ALGOKIT__DP__STRATEGY=memoized

[traversal]
# recursive | iterative
# strategy = "iterative"

[dp]
# memoized | tabulated | rolling
# strategy = "rolling"

[window]
# sum | max | min
# aggregate = "sum"
"#
        .to_string()
    }
}

/// Serialized form of a unit enum variant, as it appears in config files.
fn scalar<T: Serialize>(value: &T) -> PatternResult<String> {
    match toml::Value::try_from(value) {
        Ok(toml::Value::String(s)) => Ok(s),
        Ok(other) => Ok(other.to_string()),
        Err(e) => Err(PatternError::Config {
            message: format!("serialize default: {e}"),
        }),
    }
}

fn config_err(e: ConfigError) -> PatternError {
    PatternError::Config {
        message: e.to_string(),
    }
}
