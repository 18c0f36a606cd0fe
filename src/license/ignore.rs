use glob::{Pattern, PatternError};

/// File names that are expected to carry no license header.
pub const IGNORED_FILES: &[&str] = &[
    "README",
    "README.*",
    "LICENSE*",
    "LINGUAS",    // translation language list
    "POTFILES.*", // translation file list
    ".gitignore",
    ".gitattributes",
    "*.conf",
    "*.options",
    "*.list",
    "*.sym",
    "*.txt",
    "*.example",
    "*.rules",
    "*.pkla",
    "*.gpg",
    "*-map",
    "RFCs",
];

/// Decides whether a file without an SPDX header is excused from the report.
#[derive(Debug, Clone)]
pub struct IgnorePolicy {
    patterns: Vec<Pattern>,
}

impl IgnorePolicy {
    /// Built-in patterns plus `extra` user-supplied ones.
    pub fn new<I, S>(extra: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Self::builtin_patterns();
        for pattern in extra {
            patterns.push(Pattern::new(pattern.as_ref())?);
        }
        Ok(Self { patterns })
    }

    fn builtin_patterns() -> Vec<Pattern> {
        IGNORED_FILES
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect()
    }

    /// Match a bare file name; one trailing `.in` is ignored first.
    pub fn is_ignorable(&self, file_name: &str) -> bool {
        let name = file_name.strip_suffix(".in").unwrap_or(file_name);
        self.patterns.iter().any(|pattern| pattern.matches(name))
    }
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self {
            patterns: Self::builtin_patterns(),
        }
    }
}
