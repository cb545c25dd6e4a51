//! Search configuration
//!
//! Loaded from `--config`, `$YHTEYS_CONFIG`, or
//! `{config_dir}/yhteys/config.json`. A missing file means defaults.

use crate::search::ScoringConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default cap on results printed by the CLI
pub const DEFAULT_LIMIT: usize = 20;

/// Hard upper bound for any requested limit
pub const MAX_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Scoring constants
    pub scoring: ScoringConfig,
    /// Catalog file used when none is given on the command line
    pub catalog_path: Option<PathBuf>,
    /// Append the demo startups to the stored catalog, as the search page does
    pub include_demo: bool,
    /// Results returned when the caller does not pass a limit
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            catalog_path: None,
            include_demo: true,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchConfig {
    /// Clamp a requested result limit to `1..=MAX_LIMIT`
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_LIMIT)
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os("YHTEYS_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("yhteys").join("config.json"))
}

/// Load the configuration, from `explicit` if given
pub fn load_config(explicit: Option<&Path>) -> Result<SearchConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };

    // An explicitly named file must exist
    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        debug!("No config at {}, using defaults", path.display());
        return Ok(SearchConfig::default());
    }

    load_config_file(&path)
}

fn load_config_file(path: &Path) -> Result<SearchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: SearchConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
}
