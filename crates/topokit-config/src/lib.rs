//! Layered configuration for topokit.
//!
//! Built-in defaults, then a TOML file, then `TOPOKIT_`-prefixed environment
//! variables (`__` separates nested keys). Command-line flags are applied on
//! top of the result by the binary.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use topokit_core::{DEFAULT_SCHEMA, ExportStyle};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub build: BuildConfig,
    pub export: ExportConfig,
    pub compare: CompareConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// `$schema` written into built documents.
    pub schema: String,
    /// Default output path for `build`.
    pub out: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.into(),
            out: PathBuf::from("topology.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub style: ExportStyle,
    pub include_node_name: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            style: ExportStyle::Fixed,
            include_node_name: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Compare `nodes`, `networks` and `interfaces` regardless of order.
    pub ignore_order: bool,
    /// Print a diff when documents differ.
    pub show_diff: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            ignore_order: false,
            show_diff: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `plain`, `table`, `json` or `yaml`.
    pub format: String,
    /// `auto`, `always` or `never`.
    pub color: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "plain".into(),
            color: "auto".into(),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "topokit", "topokit").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("topokit");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the layered config. `path` overrides the platform config location.
///
/// A missing file is not an error; a malformed one is.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("TOPOKIT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Render a config as pretty TOML.
pub fn to_toml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}
