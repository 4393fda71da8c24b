/*!
 * dirmerge - Merge the text files of a directory tree into one artifact
 *
 * This library walks a directory tree once, applying glob include and
 * gitignore-style exclude patterns, and assembles the surviving files into
 * a single plain-text or Markdown document with optional redaction,
 * head/tail line limits and auxiliary views (tree, list, statistics).
 */

pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod language;
pub mod list;
pub mod merger;
pub mod report;
pub mod sanitize;
pub mod scanner;
pub mod stats;
pub mod tree;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{Args, Config, ConfigFile, OutputFormat};
pub use error::{DirMergeError, Result};
pub use filter::{GlobFilter, IgnoreFilter, VCS_PATTERNS};
pub use generator::{ContentGenerator, GenerateOptions, MarkdownGenerator, TextGenerator};
pub use list::ListBuilder;
pub use merger::{MergeSummary, Merger};
pub use report::{MergeReport, ReportFormat, Reporter};
pub use sanitize::{ReplacementRule, Sanitizer};
pub use scanner::{ScanStats, Scanner};
pub use stats::Statistics;
pub use tree::TreeBuilder;
pub use types::{FileRecord, SanitizeStats};
pub use utils::{format_size, parse_size};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
