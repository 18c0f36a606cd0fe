//! License aggregation over a directory tree.
//!
//! Every [`Subtree`] holds the union of its descendants' licenses, computed
//! once bottom-up when the tree is loaded. Walking a tree yields the report
//! in display order: a subtree whose set has at most one license (a
//! "monotree") is reported as a single line and its contents are skipped.

use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::license::LicenseSet;

pub mod grouping;
pub mod loader;

pub use grouping::SuffixGroups;
pub use loader::TreeLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    File,
    /// Subtree with more than one license; expanded in the report.
    Tree,
    /// Subtree with at most one license; collapsed in the report.
    Monotree,
    FileGlob,
    TreeGlob,
}

impl EntryKind {
    /// Display rank among siblings.
    ///
    /// Collapsed subtrees come first, then globs, then individual files, and
    /// mixed subtrees last, so complexity grows top to bottom.
    pub fn rank(self) -> u8 {
        match self {
            EntryKind::Monotree => 1,
            EntryKind::TreeGlob | EntryKind::FileGlob => 2,
            EntryKind::File => 3,
            EntryKind::Tree => 4,
        }
    }

    /// Suffix printed after the entry name.
    pub fn marker(self) -> &'static str {
        match self {
            EntryKind::File | EntryKind::FileGlob => "",
            EntryKind::Tree | EntryKind::TreeGlob => "/",
            EntryKind::Monotree => "/*",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Tree => "tree",
            EntryKind::Monotree => "monotree",
            EntryKind::FileGlob => "file-glob",
            EntryKind::TreeGlob => "tree-glob",
        }
    }
}

/// Options that change how a tree is walked.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Summarize siblings sharing a suffix and license as one glob.
    pub glob_suffixes: bool,
}

/// One line of the report, before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportItem {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub licenses: LicenseSet,
}

impl ReportItem {
    pub fn name(&self) -> String {
        file_name(&self.path)
    }

    /// Number of path segments, which drives indentation.
    pub fn depth(&self) -> usize {
        self.path.components().count()
    }
}

/// A leaf: one regular file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    path: PathBuf,
    licenses: LicenseSet,
}

impl FileEntry {
    pub fn new(path: PathBuf, licenses: LicenseSet) -> Self {
        Self { path, licenses }
    }
}

/// A directory and everything below it.
#[derive(Debug, Clone)]
pub struct Subtree {
    path: PathBuf,
    entries: Vec<Entry>,
    licenses: LicenseSet,
}

impl Subtree {
    /// Wrap already-built children, folding their licenses into ours.
    pub fn new(path: PathBuf, entries: Vec<Entry>) -> Self {
        let licenses = entries
            .iter()
            .flat_map(|entry| entry.licenses().iter().cloned())
            .collect();
        Self {
            path,
            entries,
            licenses,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Immediate children, in the order the source listed them.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn licenses(&self) -> &LicenseSet {
        &self.licenses
    }

    pub fn kind(&self) -> EntryKind {
        if self.licenses.len() > 1 {
            EntryKind::Tree
        } else {
            EntryKind::Monotree
        }
    }

    /// The full report for this subtree, in display order.
    pub fn walk(&self, options: WalkOptions) -> Vec<ReportItem> {
        let mut out = Vec::new();
        self.walk_into(options, &mut out);
        out
    }

    fn walk_into(&self, options: WalkOptions, out: &mut Vec<ReportItem>) {
        if !self.licenses.is_empty() {
            out.push(self.report_item());
        }

        if self.kind() == EntryKind::Monotree {
            // The licenses are all identical, don't list individual items.
            return;
        }

        if options.glob_suffixes {
            SuffixGroups::new(&self.entries).walk_into(options, out);
        } else {
            let mut sorted: Vec<&Entry> = self.entries.iter().collect();
            sorted.sort_by(|a, b| a.cmp_order(b));
            for entry in sorted {
                entry.walk_into(options, out);
            }
        }
    }

    fn report_item(&self) -> ReportItem {
        ReportItem {
            path: self.path.clone(),
            kind: self.kind(),
            licenses: self.licenses.clone(),
        }
    }
}

/// Synthetic entry standing for all siblings matching `*<suffix>`.
#[derive(Debug, Clone)]
pub struct SuffixGlob {
    path: PathBuf,
    licenses: LicenseSet,
    is_tree: bool,
}

impl SuffixGlob {
    pub fn new(path: PathBuf, licenses: LicenseSet, is_tree: bool) -> Self {
        Self {
            path,
            licenses,
            is_tree,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Entry {
    File(FileEntry),
    Subtree(Subtree),
    Glob(SuffixGlob),
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File(file) => &file.path,
            Entry::Subtree(subtree) => &subtree.path,
            Entry::Glob(glob) => &glob.path,
        }
    }

    pub fn name(&self) -> String {
        file_name(self.path())
    }

    pub fn licenses(&self) -> &LicenseSet {
        match self {
            Entry::File(file) => &file.licenses,
            Entry::Subtree(subtree) => &subtree.licenses,
            Entry::Glob(glob) => &glob.licenses,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Subtree(subtree) => subtree.kind(),
            Entry::Glob(glob) if glob.is_tree => EntryKind::TreeGlob,
            Entry::Glob(_) => EntryKind::FileGlob,
        }
    }

    /// Sibling sort key: `(rank, licenses, name)`.
    pub fn order_key(&self) -> (u8, &LicenseSet, String) {
        (self.kind().rank(), self.licenses(), self.name())
    }

    pub fn cmp_order(&self, other: &Entry) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }

    pub(crate) fn walk_into(&self, options: WalkOptions, out: &mut Vec<ReportItem>) {
        match self {
            Entry::Subtree(subtree) => subtree.walk_into(options, out),
            // Don't print files or globs without license.
            _ if self.licenses().is_empty() => {}
            _ => out.push(ReportItem {
                path: self.path().to_path_buf(),
                kind: self.kind(),
                licenses: self.licenses().clone(),
            }),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
