//! Read-only access to a snapshot of a source tree.
//!
//! The aggregation code only talks to [`TreeSource`]; the git backend and the
//! in-memory tree are interchangeable behind it.

use std::io::BufRead;
use std::path::Path;

use crate::error::AuditError;

pub mod git;
pub mod memory;

pub use git::GitSource;
pub use memory::MemoryTree;

/// Type of an entry as recorded in the tree object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Blob,
    Tree,
    Symlink,
    Submodule,
}

/// One immediate child of a directory in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub kind: SourceKind,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Per-path markers looked up from attributes (e.g. `.gitattributes`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathAttributes {
    pub generated: bool,
    pub binary: bool,
}

/// A snapshot of a source tree addressed by paths relative to its root.
///
/// The empty path names the root directory.
pub trait TreeSource {
    /// Immediate children of the directory at `dir`, in backend order.
    ///
    /// Fails with [`AuditError::MissingSubpath`] if `dir` does not exist and
    /// [`AuditError::NotATree`] if it is not a directory.
    fn list(&self, dir: &Path) -> Result<Vec<SourceEntry>, AuditError>;

    /// Fail with [`AuditError::UnexpectedSymlink`] unless `path` is a
    /// regular file where its content will be read from.
    fn ensure_regular(&self, path: &Path) -> Result<(), AuditError>;

    fn attributes(&self, path: &Path) -> Result<PathAttributes, AuditError>;

    /// Open the current content of the file at `path`.
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>, AuditError>;
}
