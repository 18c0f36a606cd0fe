use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::cli::Cli;
use repo_license_summary::config::{load_config, ColorChoice, OutputFormat, CONFIG_FILE};
use repo_license_summary::output::{self, JsonReport};
use repo_license_summary::source::GitSource;
use repo_license_summary::tree::{ReportItem, TreeLoader, WalkOptions};

pub fn handle_summary(cli: &Cli) -> Result<()> {
    let workdir = GitSource::discover_workdir(&cli.repository)
        .with_context(|| format!("Failed to open repository at {}", cli.repository.display()))?;

    // Load configuration from the working copy unless given explicitly
    let config_path = match &cli.config {
        Some(path) if !path.exists() => bail!("Config file not found: {}", path.display()),
        Some(path) => path.clone(),
        None => workdir.join(CONFIG_FILE),
    };
    let config = load_config(&config_path)?;

    // CLI arguments override config values
    let branch = cli.branch.clone().or_else(|| config.branch.clone());
    let options = WalkOptions {
        glob_suffixes: cli.glob_suffixes || config.glob_suffixes.unwrap_or(false),
    };
    let unknown_only = cli.unknown || config.unknown.unwrap_or(false);
    let palette = cli
        .color
        .or(config.color)
        .unwrap_or(ColorChoice::Auto)
        .palette();
    let format = cli.format.or(config.format).unwrap_or(OutputFormat::Text);
    let ignore = config.ignore_policy()?;

    let source = GitSource::open(&workdir, branch.as_deref()).with_context(|| {
        format!(
            "Failed to read revision {}",
            branch.as_deref().unwrap_or("HEAD")
        )
    })?;
    let loader = TreeLoader::new(&source, &ignore);

    let subpaths = if cli.subpaths.is_empty() {
        vec![PathBuf::new()]
    } else {
        cli.subpaths
            .iter()
            .map(|p| normalize_subpath(p))
            .collect::<Result<Vec<_>>>()?
    };

    // Every subpath is aggregated before anything is printed
    let mut reports: Vec<(PathBuf, Vec<ReportItem>)> = Vec::new();
    for subpath in subpaths {
        debug!("Scanning {}", subpath.display());
        let tree = loader
            .load(&subpath)
            .with_context(|| format!("Failed to scan {}", output::display_path(&subpath)))?;

        let mut items = tree.walk(options);
        if unknown_only {
            items.retain(output::is_unresolved);
        }
        reports.push((subpath, items));
    }

    let output_content = match format {
        OutputFormat::Json => {
            let json: Vec<JsonReport<'_>> = reports
                .iter()
                .map(|(root, entries)| JsonReport {
                    root: root.clone(),
                    entries,
                })
                .collect();
            let mut text = output::format_json(&json)?;
            text.push('\n');
            text
        }
        OutputFormat::Text if unknown_only => reports
            .iter()
            .map(|(_, items)| output::format_unknown(items, &palette))
            .collect(),
        OutputFormat::Text => reports
            .iter()
            .map(|(_, items)| output::format_summary(items, &palette))
            .collect(),
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output_content.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// Turn a user-supplied path into a tree path relative to the root.
fn normalize_subpath(path: &Path) -> Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            _ => bail!(
                "Subpath must be relative to the repository root: {}",
                path.display()
            ),
        }
    }
    Ok(normalized)
}
