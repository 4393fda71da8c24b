/*!
 * Hierarchical tree rendering of the filtered directory structure
 *
 * The tree is derived independently of the flat scan. It applies the same
 * exclude and include matchers, but additionally probes files for text
 * content, so binary files that the flat scan would include are omitted
 * here. That divergence between the two views is intentional.
 */

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::filter::{GlobFilter, IgnoreFilter};
use crate::utils::is_text_file;

/// Renders the directory tree with box-drawing connectors
pub struct TreeBuilder<'a> {
    ignore_filter: &'a IgnoreFilter,
    glob_filter: &'a GlobFilter,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(ignore_filter: &'a IgnoreFilter, glob_filter: &'a GlobFilter) -> Self {
        Self {
            ignore_filter,
            glob_filter,
        }
    }

    /// Build the tree rendering rooted at `target_dir`
    pub fn build(&self, target_dir: &Path) -> String {
        let base_name = fs::canonicalize(target_dir)
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| target_dir.display().to_string());

        let mut lines = vec![format!("{}/", base_name)];
        self.walk_directory(target_dir, "", &mut lines);
        lines.join("\n")
    }

    fn walk_directory(&self, directory: &Path, prefix: &str, lines: &mut Vec<String>) {
        let entries = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok);

        let mut dir_names: Vec<String> = Vec::new();
        let mut file_names: Vec<String> = Vec::new();

        for entry in entries {
            if entry.path_is_symlink() {
                continue;
            }

            let path = entry.path();
            let is_dir = entry.file_type().is_dir();

            if !self.ignore_filter.should_include(path, is_dir) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if is_dir {
                dir_names.push(name);
            } else if entry.file_type().is_file()
                && self.glob_filter.should_include(path, false)
                && is_text_file(path)
            {
                file_names.push(name);
            }
        }

        let dir_count = dir_names.len();
        let total = dir_count + file_names.len();

        for (i, name) in dir_names.iter().chain(file_names.iter()).enumerate() {
            let is_dir = i < dir_count;
            let is_last = i == total - 1;
            let (connector, continuation) = if is_last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };

            if is_dir {
                lines.push(format!("{}{}{}/", prefix, connector, name));
                self.walk_directory(
                    &directory.join(name),
                    &format!("{}{}", prefix, continuation),
                    lines,
                );
            } else {
                lines.push(format!("{}{}{}", prefix, connector, name));
            }
        }
    }
}
