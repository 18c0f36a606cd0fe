use clap::Parser;
use std::path::PathBuf;

use repo_license_summary::config::{ColorChoice, OutputFormat};

/// Summarize SPDX license header status
#[derive(Parser)]
#[command(name = "repo-license-summary")]
#[command(version)]
pub struct Cli {
    /// Path to the git repository (or any directory inside it)
    #[arg(long, default_value = ".")]
    pub repository: PathBuf,

    /// Branch or revision to read the tree from (default: HEAD)
    #[arg(long)]
    pub branch: Option<String>,

    /// Group siblings with the same suffix and license into one glob line
    #[arg(long)]
    pub glob_suffixes: bool,

    /// Only list files with unknown or binary licenses
    #[arg(long)]
    pub unknown: bool,

    /// When to color license names
    #[arg(long)]
    pub color: Option<ColorChoice>,

    /// Output format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Config file (default: .repo-license-summary.toml in the working copy)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Restrict the report to these paths inside the repository
    pub subpaths: Vec<PathBuf>,
}
