/*!
 * Core types and data structures for the dirmerge application
 */

use std::collections::BTreeMap;
use std::path::PathBuf;

/// A file accepted by the scan
///
/// Created once during traversal and never mutated afterwards. The record
/// list owns these; views and generators only borrow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path as produced by the walk (target directory joined with entry names)
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Number of lines in the decoded content
    pub lines: usize,
}

/// Per-category redaction counters, accumulated across the whole run
pub type SanitizeStats = BTreeMap<String, usize>;
