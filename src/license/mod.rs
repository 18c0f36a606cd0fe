use serde::Serialize;
use std::fmt;

pub mod extractor;
pub mod ignore;

// Re-export from submodules
pub use extractor::{find_license, read_license};
pub use ignore::{IgnorePolicy, IGNORED_FILES};

/// Token for a file whose header has no SPDX line within the scanned window.
pub const UNKNOWN: &str = "unknown";

/// Token for a file whose content could not be decoded as text.
pub const UNREADABLE: &str = "unreadable";

/// Token for a file marked `binary` in gitattributes.
pub const BINARY: &str = "binary";

/// Sorted, deduplicated license tokens applying to a path.
///
/// An empty set means no license requirement applies, and such entries are
/// never rendered. Ordering is lexicographic over the sorted contents, which
/// is what sibling sorting relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LicenseSet(Vec<String>);

impl LicenseSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn single(token: impl Into<String>) -> Self {
        Self(vec![token.into()])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// True when the set holds exactly `token` and nothing else.
    pub fn is_only(&self, token: &str) -> bool {
        matches!(self.0.as_slice(), [only] if only == token)
    }
}

impl FromIterator<String> for LicenseSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tokens: Vec<String> = iter.into_iter().collect();
        tokens.sort();
        tokens.dedup();
        Self(tokens)
    }
}

impl<'a> FromIterator<&'a str> for LicenseSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a LicenseSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for LicenseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}
