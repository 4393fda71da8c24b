/*!
 * Path matching for the scan: glob include role and ignore exclude role
 *
 * Both roles compile their patterns with gitignore-wildmatch semantics and
 * evaluate them against root-relative, forward-slash paths. The exclude role
 * always wins over the include role; a directory matched by an exclude
 * pattern prunes its whole subtree from the walk.
 */

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::Result;
use crate::utils::relative_to;

/// Version-control housekeeping patterns, auto-excluded when ignore-file
/// discovery found a `.gitignore`
pub const VCS_PATTERNS: &[&str] = &[
    ".git/",
    ".svn/",
    ".hg/",
    ".bzr/",
    ".gitignore",
    ".gitattributes",
    ".gitmodules",
];

/// Include-role matcher built from glob patterns
///
/// With no patterns, every path matches. Directories always pass so the walk
/// can descend into them; only plain files are tested. Invalid patterns fail
/// construction.
pub struct GlobFilter {
    spec: Option<Gitignore>,
    base_dir: PathBuf,
    debug: bool,
}

impl GlobFilter {
    /// Compile glob patterns rooted at `base_dir`
    pub fn new(patterns: &[String], base_dir: &Path, debug: bool) -> Result<Self> {
        let spec = if patterns.is_empty() {
            None
        } else {
            let mut builder = GitignoreBuilder::new(base_dir);
            for pattern in patterns {
                builder
                    .add_line(None, pattern)
                    .map_err(|e| crate::error!(Pattern, "Invalid glob pattern '{}': {}", pattern, e))?;
            }
            Some(
                builder
                    .build()
                    .map_err(|e| crate::error!(Pattern, "Failed to compile glob patterns: {}", e))?,
            )
        };

        Ok(Self {
            spec,
            base_dir: base_dir.to_path_buf(),
            debug,
        })
    }

    /// Whether any include patterns were supplied
    pub fn is_active(&self) -> bool {
        self.spec.is_some()
    }

    /// Check whether a path satisfies the include patterns
    pub fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        let spec = match &self.spec {
            Some(spec) => spec,
            None => return true,
        };

        // Directories always pass so their contents can still be scanned
        if is_dir {
            return true;
        }

        let rel_path = match relative_to(path, &self.base_dir) {
            Some(rel) => rel,
            None => {
                if self.debug {
                    eprintln!("[GLOB NOT MATCHED] {}", path.display());
                }
                return false;
            }
        };

        if spec.matched(&rel_path, false).is_ignore() {
            if self.debug {
                eprintln!("[GLOB MATCHED] {}", rel_path);
            }
            true
        } else {
            if self.debug {
                eprintln!("[GLOB NOT MATCHED] {}", rel_path);
            }
            false
        }
    }
}

/// Exclude-role matcher built from ignore-file, CLI and VCS patterns
///
/// Malformed individual patterns are skipped with a warning rather than
/// failing the run; ignore files in the wild vary in quality.
pub struct IgnoreFilter {
    spec: Gitignore,
    base_dir: PathBuf,
    debug: bool,
}

impl IgnoreFilter {
    /// Compile exclude patterns rooted at `base_dir`
    pub fn new(patterns: &[String], base_dir: &Path, debug: bool, auto_vcs_ignore: bool) -> Self {
        let mut builder = GitignoreBuilder::new(base_dir);

        if auto_vcs_ignore {
            if debug {
                eprintln!("[DEBUG] Auto-ignoring VCS files/directories: {:?}", VCS_PATTERNS);
            }
            for pattern in VCS_PATTERNS {
                let _ = builder.add_line(None, pattern);
            }
        }

        for pattern in patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                eprintln!("Warning: skipping malformed exclude pattern '{}': {}", pattern, e);
            }
        }

        let spec = builder.build().unwrap_or_else(|e| {
            eprintln!("Warning: failed to compile exclude patterns: {}", e);
            Gitignore::empty()
        });

        Self {
            spec,
            base_dir: base_dir.to_path_buf(),
            debug,
        }
    }

    /// Check whether a path survives the exclude patterns
    pub fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        !self.is_ignored(path, is_dir)
    }

    fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let rel_path = match relative_to(path, &self.base_dir) {
            Some(rel) => rel,
            // Paths outside the base directory are dropped rather than kept
            None => return true,
        };

        if self.spec.matched(&rel_path, is_dir).is_ignore() {
            if self.debug {
                if is_dir {
                    eprintln!("[IGNORED DIR] {}/", rel_path);
                } else {
                    eprintln!("[IGNORED] {}", rel_path);
                }
            }
            return true;
        }

        false
    }

    /// Load exclude patterns from an ignore file
    ///
    /// Blank lines and `#` comment lines are skipped; every other line is one
    /// raw pattern.
    pub fn load_patterns(ignore_file_path: &Path) -> io::Result<Vec<String>> {
        let file = fs::File::open(ignore_file_path)?;
        let reader = BufReader::new(file);

        let mut patterns = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() && !line.starts_with('#') {
                patterns.push(line.to_string());
            }
        }
        Ok(patterns)
    }

    /// Look for a `.gitignore` in the target directory
    pub fn auto_detect_ignore_file(target_dir: &Path) -> Option<PathBuf> {
        let gitignore_path = target_dir.join(".gitignore");
        if gitignore_path.exists() {
            Some(gitignore_path)
        } else {
            None
        }
    }

    /// Load and merge patterns from several ignore files
    ///
    /// Unreadable files contribute nothing beyond a warning.
    pub fn load_patterns_from_multiple(file_paths: &[PathBuf]) -> Vec<String> {
        let mut all_patterns = Vec::new();
        for file_path in file_paths {
            match Self::load_patterns(file_path) {
                Ok(patterns) => all_patterns.extend(patterns),
                Err(e) => eprintln!(
                    "Warning: failed to read ignore file {}: {}",
                    file_path.display(),
                    e
                ),
            }
        }
        all_patterns
    }
}
