/*!
 * Output assembly: composes the optional sections and the merged file
 * bodies into one artifact
 *
 * Two renderings exist, plain text and Markdown, behind the
 * `ContentGenerator` trait. Both iterate the records in scan order, window
 * the content, then sanitize it, and recover per-file read failures with an
 * in-band placeholder so one unreadable file never aborts the run.
 */

use std::fs;
use std::io;
use std::path::Path;

use indicatif::ProgressBar;

use crate::language::get_language;
use crate::sanitize::{ReplacementRule, Sanitizer};
use crate::stats::Statistics;
use crate::types::{FileRecord, SanitizeStats};
use crate::utils::{format_size, limit_lines, relative_to};

/// Per-run options consumed by the generators
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Run the automatic detectors
    pub sanitize: bool,
    /// User-supplied replacement rules, applied after the detectors
    pub custom_rules: Vec<ReplacementRule>,
    /// Keep only the first N lines of each file
    pub head_lines: Option<usize>,
    /// Keep only the last N lines of each file
    pub tail_lines: Option<usize>,
    pub include_tree: bool,
    pub include_list: bool,
    pub include_stats: bool,
    /// Include the file bodies section
    pub include_merge: bool,
    /// Pre-rendered tree view, passed through verbatim
    pub tree: Option<String>,
    /// Pre-rendered file list, passed through verbatim
    pub list: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            sanitize: false,
            custom_rules: Vec::new(),
            head_lines: None,
            tail_lines: None,
            include_tree: false,
            include_list: false,
            include_stats: false,
            include_merge: true,
            tree: None,
            list: None,
        }
    }
}

/// One output rendering
pub trait ContentGenerator {
    /// Assemble the artifact, returning it with the accumulated sanitize
    /// counters
    fn generate(
        &self,
        records: &[FileRecord],
        target_dir: &Path,
        options: &GenerateOptions,
        progress: &ProgressBar,
    ) -> (String, SanitizeStats);
}

/// Plain-text rendering with `--- path ---` delimited blocks
pub struct TextGenerator;

/// Markdown rendering with per-file fenced code blocks
pub struct MarkdownGenerator;

impl ContentGenerator for TextGenerator {
    fn generate(
        &self,
        records: &[FileRecord],
        target_dir: &Path,
        options: &GenerateOptions,
        progress: &ProgressBar,
    ) -> (String, SanitizeStats) {
        let sanitizer = Sanitizer::new(options.sanitize, &options.custom_rules);
        let mut all_stats = SanitizeStats::new();
        let mut out = String::new();

        if options.include_stats {
            let stats = Statistics::calculate(records);
            out.push_str("=== Statistics ===\n");
            out.push_str(&format!("Total files: {}\n", stats.total_files));
            out.push_str(&format!("Total lines: {}\n", stats.total_lines));
            out.push_str(&format!("Total size: {}\n", format_size(stats.total_size)));

            if !stats.by_extension.is_empty() {
                out.push_str("\nBy extension:\n");
                for (ext, ext_stats) in stats.by_extension_sorted() {
                    out.push_str(&format!(
                        "  {:<15} {:>4} files  {:>6} lines  {:>10}\n",
                        ext,
                        ext_stats.count,
                        ext_stats.lines,
                        format_size(ext_stats.size)
                    ));
                }
            }
            out.push('\n');
        }

        if options.include_tree {
            if let Some(tree) = &options.tree {
                out.push_str("=== Directory Structure ===\n");
                out.push_str(tree);
                if !tree.ends_with('\n') {
                    out.push('\n');
                }
                out.push('\n');
            }
        }

        if options.include_list {
            if let Some(list) = &options.list {
                out.push_str("=== File List ===\n");
                out.push_str(list);
                if !list.ends_with('\n') {
                    out.push('\n');
                }
                out.push('\n');
            }
        }

        if options.include_merge {
            for record in records {
                progress.inc(1);
                out.push_str(&format!("--- {} ---\n", display_path(&record.path, target_dir)));

                match prepare_content(record, options, &sanitizer, &mut all_stats) {
                    Ok(content) => {
                        out.push_str(&content);
                        out.push_str("\n\n");
                    }
                    Err(e) => {
                        warn_read_failure(&record.path, &e);
                        out.push_str(&read_failure_placeholder(&record.path, &e));
                        out.push_str("\n\n");
                    }
                }
            }
        }

        (out, all_stats)
    }
}

impl ContentGenerator for MarkdownGenerator {
    fn generate(
        &self,
        records: &[FileRecord],
        target_dir: &Path,
        options: &GenerateOptions,
        progress: &ProgressBar,
    ) -> (String, SanitizeStats) {
        let sanitizer = Sanitizer::new(options.sanitize, &options.custom_rules);
        let mut all_stats = SanitizeStats::new();
        let mut out = String::new();

        if options.include_stats {
            let stats = Statistics::calculate(records);
            out.push_str("## Summary\n\n");
            out.push_str(&format!("- **Total files**: {}\n", stats.total_files));
            out.push_str(&format!("- **Total lines**: {}\n", stats.total_lines));
            out.push_str(&format!("- **Total size**: {}\n\n", format_size(stats.total_size)));

            if !stats.by_extension.is_empty() {
                out.push_str("### By Extension\n\n");
                out.push_str("| Extension | Files | Lines | Size |\n");
                out.push_str("|-----------|-------|-------|------|\n");
                for (ext, ext_stats) in stats.by_extension_sorted() {
                    out.push_str(&format!(
                        "| {} | {} | {} | {} |\n",
                        ext,
                        ext_stats.count,
                        ext_stats.lines,
                        format_size(ext_stats.size)
                    ));
                }
                out.push('\n');
            }

            out.push_str("---\n\n");
        }

        if options.include_tree {
            if let Some(tree) = &options.tree {
                out.push_str("## Directory Structure\n\n");
                out.push_str("```\n");
                out.push_str(tree);
                if !tree.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```\n\n");
                out.push_str("---\n\n");
            }
        }

        if options.include_list {
            if let Some(list) = &options.list {
                out.push_str("## File List\n\n");
                out.push_str("```\n");
                out.push_str(list);
                if !list.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```\n\n");
                out.push_str("---\n\n");
            }
        }

        if options.include_merge {
            out.push_str("## Files\n\n");

            for record in records {
                progress.inc(1);
                out.push_str(&format!("### `{}`\n\n", display_path(&record.path, target_dir)));

                match prepare_content(record, options, &sanitizer, &mut all_stats) {
                    Ok(content) => {
                        out.push_str(&format!("```{}\n", get_language(&record.path)));
                        out.push_str(&content);
                        if !content.ends_with('\n') {
                            out.push('\n');
                        }
                        out.push_str("```\n\n");
                    }
                    Err(e) => {
                        warn_read_failure(&record.path, &e);
                        out.push_str(&format!(
                            "```text\n{}\n```\n\n",
                            read_failure_placeholder(&record.path, &e)
                        ));
                    }
                }
            }
        }

        (out, all_stats)
    }
}

/// Root-relative display form with a single leading slash
fn display_path(path: &Path, target_dir: &Path) -> String {
    match relative_to(path, target_dir) {
        Some(rel) => format!("/{}", rel),
        None => path.display().to_string(),
    }
}

/// Read, window, then sanitize one file, folding its counters into the
/// run-wide accumulator
fn prepare_content(
    record: &FileRecord,
    options: &GenerateOptions,
    sanitizer: &Sanitizer,
    all_stats: &mut SanitizeStats,
) -> io::Result<String> {
    let bytes = fs::read(&record.path)?;
    let content = String::from_utf8_lossy(&bytes);
    let content = limit_lines(&content, options.head_lines, options.tail_lines);

    let (content, file_stats) = sanitizer.sanitize(&content);
    for (category, count) in file_stats {
        *all_stats.entry(category).or_insert(0) += count;
    }

    Ok(content)
}

fn read_failure_placeholder(path: &Path, e: &io::Error) -> String {
    if e.kind() == io::ErrorKind::PermissionDenied {
        format!("[Error: Permission denied reading {}]", path.display())
    } else {
        format!("[Error reading {}: {}]", path.display(), e)
    }
}

fn warn_read_failure(path: &Path, e: &io::Error) {
    if e.kind() == io::ErrorKind::PermissionDenied {
        eprintln!("Warning: Permission denied reading {}", path.display());
    } else {
        eprintln!("Warning: Failed to read {}: {}", path.display(), e);
    }
}
