pub mod config;
pub mod error;
pub mod license;
pub mod logging;
pub mod output;
pub mod source;
pub mod tree;

// Re-export main types for easy access
pub use error::AuditError;
pub use license::{IgnorePolicy, LicenseSet};
pub use source::{GitSource, MemoryTree, TreeSource};
pub use tree::{Entry, EntryKind, ReportItem, Subtree, TreeLoader, WalkOptions};
