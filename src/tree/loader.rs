use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::{Entry, FileEntry, Subtree};
use crate::error::AuditError;
use crate::license::{self, IgnorePolicy, LicenseSet};
use crate::source::{SourceKind, TreeSource};

/// Builds [`Subtree`]s from a [`TreeSource`], classifying every file.
pub struct TreeLoader<'a> {
    source: &'a dyn TreeSource,
    ignore: &'a IgnorePolicy,
}

impl<'a> TreeLoader<'a> {
    pub fn new(source: &'a dyn TreeSource, ignore: &'a IgnorePolicy) -> Self {
        Self { source, ignore }
    }

    /// Load the directory at `path` and everything below it.
    pub fn load(&self, path: &Path) -> Result<Subtree, AuditError> {
        let mut entries = Vec::new();

        for item in self.source.list(path)? {
            let item_path = path.join(&item.name);
            match item.kind {
                SourceKind::Tree => entries.push(Entry::Subtree(self.load(&item_path)?)),
                SourceKind::Blob => {
                    let licenses = self.file_licenses(&item_path)?;
                    entries.push(Entry::File(FileEntry::new(item_path, licenses)));
                }
                SourceKind::Symlink => debug!("{}: symlink, skipping", item_path.display()),
                SourceKind::Submodule => debug!("{}: submodule, skipping", item_path.display()),
            }
        }

        Ok(Subtree::new(path.to_path_buf(), entries))
    }

    /// License set of one regular file.
    pub fn file_licenses(&self, path: &Path) -> Result<LicenseSet, AuditError> {
        self.source.ensure_regular(path)?;

        let attributes = self.source.attributes(path)?;
        if attributes.generated {
            debug!("{}: generated, no license applies", path.display());
            return Ok(LicenseSet::empty());
        }
        if attributes.binary {
            // Unparsable for us.
            return Ok(LicenseSet::single(license::BINARY));
        }

        let reader = self.source.open(path)?;
        let token = match license::read_license(reader) {
            Ok(token) => token,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Cannot read {}: {}", path.display(), e);
                return Ok(LicenseSet::single(license::UNREADABLE));
            }
            Err(e) => return Err(AuditError::io(path, e)),
        };

        if token == license::UNKNOWN {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            if self.ignore.is_ignorable(&name) {
                debug!("{}: no license, ignoring file", path.display());
                return Ok(LicenseSet::empty());
            }
        }

        Ok(LicenseSet::single(token))
    }
}
