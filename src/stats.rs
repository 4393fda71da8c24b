/*!
 * Aggregate statistics over the scan result
 */

use std::path::Path;

use crate::types::FileRecord;
use crate::utils::format_size;

/// Per-extension aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionStats {
    pub count: usize,
    pub lines: usize,
    pub size: u64,
}

/// Aggregate file/line/byte counts with a per-extension breakdown
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_size: u64,
    /// Extension label to aggregate, in first-seen record order
    pub by_extension: Vec<(String, ExtensionStats)>,
}

/// Label used for files without an extension
const NO_EXTENSION: &str = "(no extension)";

impl Statistics {
    /// Compute statistics from the record list
    pub fn calculate(records: &[FileRecord]) -> Self {
        let mut stats = Statistics {
            total_files: records.len(),
            ..Default::default()
        };

        for record in records {
            stats.total_lines += record.lines;
            stats.total_size += record.size;

            let label = extension_label(&record.path);
            match stats.by_extension.iter_mut().find(|(ext, _)| *ext == label) {
                Some((_, ext_stats)) => {
                    ext_stats.count += 1;
                    ext_stats.lines += record.lines;
                    ext_stats.size += record.size;
                }
                None => stats.by_extension.push((
                    label,
                    ExtensionStats {
                        count: 1,
                        lines: record.lines,
                        size: record.size,
                    },
                )),
            }
        }

        stats
    }

    /// Extension breakdown sorted by descending file count
    pub fn by_extension_sorted(&self) -> Vec<(&str, &ExtensionStats)> {
        let mut sorted: Vec<(&str, &ExtensionStats)> = self
            .by_extension
            .iter()
            .map(|(ext, ext_stats)| (ext.as_str(), ext_stats))
            .collect();
        sorted.sort_by(|(_, a), (_, b)| b.count.cmp(&a.count));
        sorted
    }

    /// Print the statistics banner used by the display-only mode
    pub fn print(&self) {
        let rule = "=".repeat(50);
        println!("\n{}", rule);
        println!("Statistics");
        println!("{}", rule);
        println!("Total files:  {}", self.total_files);
        println!("Total lines:  {}", self.total_lines);
        println!("Total size:   {}", format_size(self.total_size));

        if !self.by_extension.is_empty() {
            println!("\nBy extension:");
            for (ext, ext_stats) in self.by_extension_sorted() {
                println!(
                    "  {:<15} {:>4} files  {:>6} lines  {:>10}",
                    ext,
                    ext_stats.count,
                    ext_stats.lines,
                    format_size(ext_stats.size)
                );
            }
        }
        println!("{}\n", rule);
    }
}

fn extension_label(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => NO_EXTENSION.to_string(),
    }
}
