/*!
 * Directory traversal and file collection
 */

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::filter::{GlobFilter, IgnoreFilter};
use crate::types::FileRecord;
use crate::utils::format_size;

/// Advisory threshold for very large files
const LARGE_FILE_WARNING_BYTES: u64 = 100 * 1024 * 1024;

/// Filter counters for one traversal
///
/// Reset at the start of every `scan` call and read once after it completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Plain files visited (symlinks excluded)
    pub scanned: usize,
    /// Files rejected by the include matcher
    pub glob_filtered: usize,
    /// Files and pruned directories rejected by the exclude matcher
    pub ignored: usize,
    /// Files accepted into the record list
    pub included: usize,
}

/// Scanner for directory contents
pub struct Scanner<'a> {
    glob_filter: &'a GlobFilter,
    ignore_filter: &'a IgnoreFilter,
    debug: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner over the given matcher pair
    pub fn new(glob_filter: &'a GlobFilter, ignore_filter: &'a IgnoreFilter, debug: bool) -> Self {
        Self {
            glob_filter,
            ignore_filter,
            debug,
        }
    }

    /// Scan the target directory and collect accepted file records
    ///
    /// The record list follows the walk order: the files of a directory come
    /// before the files of its subdirectories, and no further sort is
    /// imposed. Consumers that need a different order must sort explicitly.
    pub fn scan(&self, target_dir: &Path) -> (Vec<FileRecord>, ScanStats) {
        let mut records = Vec::new();
        let mut stats = ScanStats::default();
        self.scan_directory(target_dir, &mut records, &mut stats);
        (records, stats)
    }

    fn scan_directory(&self, dir: &Path, records: &mut Vec<FileRecord>, stats: &mut ScanStats) {
        // One level at a time; unreadable listings are skipped silently
        let entries: Vec<walkdir::DirEntry> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .collect();

        let (dirs, files): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|e| e.file_type().is_dir());

        for entry in files {
            let path = entry.path();

            if entry.path_is_symlink() {
                if self.debug {
                    eprintln!("[SKIPPED SYMLINK] {}", path.display());
                }
                continue;
            }

            stats.scanned += 1;

            if !self.glob_filter.should_include(path, false) {
                stats.glob_filtered += 1;
                continue;
            }
            if !self.ignore_filter.should_include(path, false) {
                stats.ignored += 1;
                continue;
            }

            let (size, lines) = self.file_metadata(path);
            records.push(FileRecord {
                path: path.to_path_buf(),
                size,
                lines,
            });
            stats.included += 1;
            if self.debug {
                eprintln!("[ADDED] {}", path.display());
            }
        }

        for entry in dirs {
            let path = entry.path();

            // Excluded directories are pruned: nothing beneath them is visited
            if !self.ignore_filter.should_include(path, true) {
                stats.ignored += 1;
                continue;
            }

            self.scan_directory(path, records, stats);
        }
    }

    /// Read size and line count for an accepted file
    ///
    /// Any failure yields `(0, 0)` rather than aborting the traversal.
    fn file_metadata(&self, path: &Path) -> (u64, usize) {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(_) => return (0, 0),
        };
        let size = metadata.len();

        if size > LARGE_FILE_WARNING_BYTES {
            eprintln!(
                "Warning: Large file detected ({}, {})",
                path.display(),
                format_size(size)
            );
            eprintln!("         This may consume significant memory.");
        }

        match fs::read(path) {
            Ok(bytes) => (size, String::from_utf8_lossy(&bytes).lines().count()),
            Err(_) => (0, 0),
        }
    }
}
