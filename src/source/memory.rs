use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::path::{Component, Path, PathBuf};

use super::{PathAttributes, SourceEntry, SourceKind, TreeSource};
use crate::error::AuditError;

#[derive(Debug, Clone)]
enum MemoryNode {
    File {
        content: Vec<u8>,
        attributes: PathAttributes,
    },
    /// Recorded as a symlink in the tree itself.
    Link,
    /// Recorded as a regular file, but a symlink where content is read.
    LinkedFile,
}

/// A source tree held in memory, built up file by file.
///
/// Directories exist implicitly through the paths of the files below them.
/// Children are listed in name order.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: BTreeMap<PathBuf, MemoryNode>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.with_attributed_file(path, content, PathAttributes::default())
    }

    pub fn with_generated(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        let attributes = PathAttributes {
            generated: true,
            binary: false,
        };
        self.with_attributed_file(path, content, attributes)
    }

    pub fn with_binary(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        let attributes = PathAttributes {
            generated: false,
            binary: true,
        };
        self.with_attributed_file(path, content, attributes)
    }

    pub fn with_attributed_file(
        mut self,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
        attributes: PathAttributes,
    ) -> Self {
        let node = MemoryNode::File {
            content: content.into(),
            attributes,
        };
        self.nodes.insert(path.into(), node);
        self
    }

    pub fn with_symlink(mut self, path: impl Into<PathBuf>) -> Self {
        self.nodes.insert(path.into(), MemoryNode::Link);
        self
    }

    /// A file the tree records as regular but which is a symlink on disk.
    pub fn with_linked_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.nodes.insert(path.into(), MemoryNode::LinkedFile);
        self
    }

    fn node(&self, path: &Path) -> Result<&MemoryNode, AuditError> {
        self.nodes.get(path).ok_or_else(|| {
            AuditError::io(path, io::Error::from(io::ErrorKind::NotFound))
        })
    }
}

impl TreeSource for MemoryTree {
    fn list(&self, dir: &Path) -> Result<Vec<SourceEntry>, AuditError> {
        let mut children: BTreeMap<String, SourceKind> = BTreeMap::new();

        for (path, node) in &self.nodes {
            let Ok(rest) = path.strip_prefix(dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(Component::Normal(first)) = components.next() else {
                continue;
            };
            let kind = if components.next().is_some() {
                SourceKind::Tree
            } else {
                match node {
                    MemoryNode::Link => SourceKind::Symlink,
                    MemoryNode::File { .. } | MemoryNode::LinkedFile => SourceKind::Blob,
                }
            };
            children.insert(first.to_string_lossy().into_owned(), kind);
        }

        if children.is_empty() && !dir.as_os_str().is_empty() {
            if self.nodes.contains_key(dir) {
                return Err(AuditError::NotATree(dir.to_path_buf()));
            }
            return Err(AuditError::MissingSubpath(dir.to_path_buf()));
        }

        Ok(children
            .into_iter()
            .map(|(name, kind)| SourceEntry::new(name, kind))
            .collect())
    }

    fn ensure_regular(&self, path: &Path) -> Result<(), AuditError> {
        match self.node(path)? {
            MemoryNode::File { .. } => Ok(()),
            MemoryNode::Link | MemoryNode::LinkedFile => {
                Err(AuditError::UnexpectedSymlink(path.to_path_buf()))
            }
        }
    }

    fn attributes(&self, path: &Path) -> Result<PathAttributes, AuditError> {
        match self.node(path)? {
            MemoryNode::File { attributes, .. } => Ok(*attributes),
            _ => Ok(PathAttributes::default()),
        }
    }

    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>, AuditError> {
        match self.node(path)? {
            MemoryNode::File { content, .. } => Ok(Box::new(content.as_slice())),
            _ => Err(AuditError::UnexpectedSymlink(path.to_path_buf())),
        }
    }
}
