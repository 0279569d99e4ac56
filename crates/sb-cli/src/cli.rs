//! CLI configuration and settings management

use crate::{CliError, Result};
use sb_core::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration loaded from config files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Generated unit naming, runtime API names, and policies
    pub generator: GeneratorConfig,

    /// Where and how the unit is written
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmitKind {
    #[default]
    Java,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub emit: EmitKind,

    /// Source root the unit is written under when `--output` is not given
    pub directory: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from file, falling back to defaults.
    ///
    /// Without an explicit path the user config directory, the home directory, and the
    /// working directory are layered in that order, later files overriding single keys
    /// of earlier ones.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let mut merged = toml::Table::new();
        for path in Self::search_paths() {
            if path.is_file() {
                tracing::debug!("loading config {}", path.display());
                merge_tables(&mut merged, read_table(&path)?);
            }
        }
        toml::Value::Table(merged)
            .try_into()
            .map_err(|e| CliError::Config(format!("Failed to parse merged config: {}", e)))
    }

    /// Candidate config files, lowest precedence first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = Self::default_config_path() {
            paths.push(path);
        }
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".springboard.toml"));
        }
        paths.push(PathBuf::from("springboard.toml"));
        paths
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("springboard").join("config.toml"))
    }
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    content.parse::<toml::Table>().map_err(|e| {
        CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

/// Deep-merge `overlay` into `base`; nested tables merge key by key, everything else
/// is replaced.
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
