use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

use super::{Entry, EntryKind, ReportItem, SuffixGlob, WalkOptions};
use crate::license::LicenseSet;

/// Bucket key for collapsed subdirectories.
const TREE_KEY: &str = "/";

/// The children of one mixed subtree, partitioned by file name suffix.
///
/// Buckets whose members all share one license set and kind are summarized
/// as a single [`SuffixGlob`]; everything else is walked individually.
pub struct SuffixGroups<'a> {
    by_suffix: IndexMap<String, Vec<&'a Entry>>,
    ungrouped: Vec<&'a Entry>,
}

impl<'a> SuffixGroups<'a> {
    pub fn new(entries: &'a [Entry]) -> Self {
        let mut by_suffix: IndexMap<String, Vec<&'a Entry>> = IndexMap::new();
        let mut ungrouped = Vec::new();

        for entry in entries {
            match entry.kind() {
                // Cannot group (non-mono-)tree
                EntryKind::Tree => ungrouped.push(entry),
                EntryKind::Monotree => by_suffix
                    .entry(TREE_KEY.to_string())
                    .or_default()
                    .push(entry),
                _ => by_suffix
                    .entry(suffix(entry.path()))
                    .or_default()
                    .push(entry),
            }
        }

        // We cannot group any subtrees if we can't group them all.
        if !ungrouped.is_empty() {
            if let Some(trees) = by_suffix.shift_remove(TREE_KEY) {
                ungrouped.extend(trees);
            }
        }

        Self {
            by_suffix,
            ungrouped,
        }
    }

    /// Bucket results: one glob per uniform bucket, original members otherwise.
    pub fn grouped(&self) -> Vec<Cow<'a, Entry>> {
        let mut out = Vec::new();

        for (suffix, items) in &self.by_suffix {
            let shared: HashSet<(EntryKind, &LicenseSet)> = items
                .iter()
                .map(|item| (item.kind(), item.licenses()))
                .collect();

            // A single item reads better without a glob, and an empty suffix
            // would make a confusing one.
            if shared.len() == 1 && items.len() > 1 && !suffix.is_empty() {
                let is_tree = items[0].kind() == EntryKind::Monotree;
                let parent = items[0].path().parent().unwrap_or_else(|| Path::new(""));
                let pattern = if is_tree {
                    "*".to_string()
                } else {
                    format!("*{suffix}")
                };
                let glob = SuffixGlob::new(
                    parent.join(pattern),
                    items[0].licenses().clone(),
                    is_tree,
                );
                out.push(Cow::Owned(Entry::Glob(glob)));
            } else {
                out.extend(items.iter().map(|item| Cow::Borrowed(*item)));
            }
        }

        out
    }

    pub(crate) fn walk_into(&self, options: WalkOptions, out: &mut Vec<ReportItem>) {
        let mut grouped = self.grouped();
        grouped.sort_by(|a, b| a.cmp_order(b));
        for entry in &grouped {
            entry.walk_into(options, out);
        }

        let mut ungrouped = self.ungrouped.clone();
        ungrouped.sort_by(|a, b| a.cmp_order(b));
        for entry in ungrouped {
            entry.walk_into(options, out);
        }
    }
}

/// File name suffix including the dot, or empty if there is none.
fn suffix(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy()),
        _ => String::new(),
    }
}
