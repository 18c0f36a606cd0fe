use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::license::IgnorePolicy;
use crate::output::Palette;

/// Name of the optional config file at the working-copy root.
pub const CONFIG_FILE: &str = ".repo-license-summary.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn palette(self) -> Palette {
        match self {
            ColorChoice::Auto => Palette::detect(),
            ColorChoice::Always => Palette::new(true),
            ColorChoice::Never => Palette::new(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Revision to read the tree from
    pub branch: Option<String>,

    /// Group siblings sharing a suffix and license
    pub glob_suffixes: Option<bool>,

    /// Only list files with unknown or binary licenses
    pub unknown: Option<bool>,

    /// When to color license names
    pub color: Option<ColorChoice>,

    /// Report format
    pub format: Option<OutputFormat>,

    /// Extra file name patterns excused from carrying a license header
    pub ignored_files: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch: None,
            glob_suffixes: Some(false),
            unknown: Some(false),
            color: Some(ColorChoice::Auto),
            format: Some(OutputFormat::Text),
            ignored_files: None,
        }
    }
}

impl Config {
    /// Built-in ignore patterns plus the configured ones.
    pub fn ignore_policy(&self) -> Result<IgnorePolicy> {
        let extra = self.ignored_files.as_deref().unwrap_or_default();
        IgnorePolicy::new(extra).context("Invalid pattern in ignored_files")
    }
}

/// Load configuration from `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    // Validate patterns up front rather than mid-scan
    config.ignore_policy()?;

    Ok(config)
}
