use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an audit.
///
/// Everything else (undecodable content, missing headers) is absorbed into a
/// license token instead of surfacing here.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("symlink in unexpected place: {}", .0.display())]
    UnexpectedSymlink(PathBuf),

    #[error("path not found in tree: {}", .0.display())]
    MissingSubpath(PathBuf),

    #[error("not a directory in tree: {}", .0.display())]
    NotATree(PathBuf),

    #[error("repository has no working directory: {}", .0.display())]
    BareRepository(PathBuf),
}

impl AuditError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
