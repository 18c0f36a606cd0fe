use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::license::{LicenseSet, BINARY, UNKNOWN, UNREADABLE};
use crate::tree::{EntryKind, ReportItem};

const INDENT: &str = "    ";

/// Display settings injected into the renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colors on when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { color }
    }

    /// Render one license expression, coloring each word by category.
    pub fn highlight(&self, spec: &str) -> String {
        if !self.color {
            return spec.to_string();
        }

        spec.split_whitespace()
            .map(|part| {
                let bare = part.trim_matches(|c| c == '(' || c == ')');
                match license_style(bare) {
                    Some(style) => part.style(style).to_string(),
                    None => part.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn highlight_set(&self, licenses: &LicenseSet) -> String {
        licenses
            .iter()
            .map(|spec| self.highlight(spec))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn license_style(name: &str) -> Option<Style> {
    let style = match name {
        UNKNOWN | UNREADABLE => Style::new().red(),
        // a binary file with no license specified
        BINARY => Style::new().magenta(),
        "WITH" | "AND" | "OR" => return None,
        s if s.contains("LGPL") => Style::new().green(),
        s if s.contains("GPL") => Style::new().green().bold(),
        s if s.contains("CC0-") || s.contains("public-domain") || s.contains("BSD") => {
            Style::new().blue()
        }
        "MIT" => Style::new().blue().bold(),
        _ => Style::new().bold(),
    };
    Some(style)
}

/// Indented tree report.
///
/// Consecutive lines at the same depth with the same licenses print the
/// annotation only once.
pub fn format_summary(items: &[ReportItem], palette: &Palette) -> String {
    let mut output = String::new();
    let mut prev: Option<(usize, &LicenseSet)> = None;

    for item in items {
        let depth = item.depth();
        let indent = INDENT.repeat(depth);
        let name = item.name();
        let marker = item.kind.marker();

        if prev == Some((depth, &item.licenses)) {
            output.push_str(&format!("{indent}{name}{marker}\n"));
        } else {
            let mut disp = palette.highlight_set(&item.licenses);
            if disp.is_empty() {
                disp = "(none)".to_string();
            }
            output.push_str(&format!("{indent}{name}{marker} → {disp}\n"));
            prev = Some((depth, &item.licenses));
        }
    }

    output
}

/// True for report lines that point at a single unresolved path or group.
pub fn is_unresolved(item: &ReportItem) -> bool {
    item.kind != EntryKind::Tree
        && (item.licenses.is_only(UNKNOWN) || item.licenses.is_only(BINARY))
}

/// Flat list of full paths that have no usable license.
pub fn format_unknown(items: &[ReportItem], palette: &Palette) -> String {
    let mut output = String::new();

    for item in items.iter().filter(|item| is_unresolved(item)) {
        output.push_str(&format!(
            "{}{} → {}\n",
            display_path(&item.path),
            item.kind.marker(),
            palette.highlight_set(&item.licenses)
        ));
    }

    output
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub root: PathBuf,
    pub entries: &'a [ReportItem],
}

pub fn format_json(reports: &[JsonReport<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

/// A tree path for display; the root shows as `.`.
pub fn display_path(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path.display().to_string()
    }
}
