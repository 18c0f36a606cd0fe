use git2::{AttrCheckFlags, AttrValue, ErrorCode, FileMode, ObjectType, Repository, Tree};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{PathAttributes, SourceEntry, SourceKind, TreeSource};
use crate::error::AuditError;

/// Tree structure from a git revision, file content from the working copy.
///
/// Content is read from disk rather than from the committed blobs so that
/// uncommitted edits show up in the report.
pub struct GitSource {
    repo: Repository,
    root: git2::Oid,
    workdir: PathBuf,
}

impl GitSource {
    /// Open the repository containing `location` at `revision` (default `HEAD`).
    pub fn open(location: &Path, revision: Option<&str>) -> Result<Self, AuditError> {
        let repo = Repository::discover(location)?;
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| AuditError::BareRepository(repo.path().to_path_buf()))?;

        let revision = revision.unwrap_or("HEAD");
        let root = repo.revparse_single(revision)?.peel_to_tree()?.id();
        debug!("Using tree {} from revision {}", root, revision);

        Ok(Self {
            repo,
            root,
            workdir,
        })
    }

    /// Working-copy root of the repository containing `location`.
    pub fn discover_workdir(location: &Path) -> Result<PathBuf, AuditError> {
        let repo = Repository::discover(location)?;
        repo.workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| AuditError::BareRepository(repo.path().to_path_buf()))
    }

    fn tree_at(&self, dir: &Path) -> Result<Tree<'_>, AuditError> {
        let root = self.repo.find_tree(self.root)?;
        if dir.as_os_str().is_empty() {
            return Ok(root);
        }

        let entry = root.get_path(dir).map_err(|e| match e.code() {
            ErrorCode::NotFound => AuditError::MissingSubpath(dir.to_path_buf()),
            _ => AuditError::Git(e),
        })?;
        if entry.kind() != Some(ObjectType::Tree) {
            return Err(AuditError::NotATree(dir.to_path_buf()));
        }
        Ok(self.repo.find_tree(entry.id())?)
    }

    fn attribute_set(&self, path: &Path, name: &str) -> Result<bool, AuditError> {
        let value = self
            .repo
            .get_attr(path, name, AttrCheckFlags::FILE_THEN_INDEX)?;
        Ok(match AttrValue::from_string(value) {
            AttrValue::True => true,
            AttrValue::String(s) => !s.is_empty(),
            AttrValue::Bytes(b) => !b.is_empty(),
            _ => false,
        })
    }
}

impl TreeSource for GitSource {
    fn list(&self, dir: &Path) -> Result<Vec<SourceEntry>, AuditError> {
        let tree = self.tree_at(dir)?;
        let link_mode = i32::from(FileMode::Link);

        let entries = tree
            .iter()
            .map(|entry| {
                let name = String::from_utf8_lossy(entry.name_bytes()).into_owned();
                let kind = match entry.kind() {
                    Some(ObjectType::Tree) => SourceKind::Tree,
                    Some(ObjectType::Commit) => SourceKind::Submodule,
                    _ if entry.filemode() == link_mode => SourceKind::Symlink,
                    _ => SourceKind::Blob,
                };
                SourceEntry::new(name, kind)
            })
            .collect();
        Ok(entries)
    }

    fn ensure_regular(&self, path: &Path) -> Result<(), AuditError> {
        let full = self.workdir.join(path);
        let metadata = fs::symlink_metadata(&full).map_err(|e| AuditError::io(&full, e))?;
        if metadata.file_type().is_symlink() {
            return Err(AuditError::UnexpectedSymlink(path.to_path_buf()));
        }
        Ok(())
    }

    fn attributes(&self, path: &Path) -> Result<PathAttributes, AuditError> {
        Ok(PathAttributes {
            generated: self.attribute_set(path, "generated")?,
            binary: self.attribute_set(path, "binary")?,
        })
    }

    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>, AuditError> {
        let full = self.workdir.join(path);
        let file = File::open(&full).map_err(|e| AuditError::io(&full, e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}
