/*!
 * Run orchestration: scan, views, confirmation, assembly, write
 *
 * A run either short-circuits after printing the requested views
 * (display-only mode) or proceeds through confirmation, assembly and the
 * single artifact write. Write failures are fatal and propagate; everything
 * smaller is contained where it happens.
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};

use indicatif::ProgressBar;

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::generator::{ContentGenerator, GenerateOptions};
use crate::list::ListBuilder;
use crate::sanitize::ReplacementRule;
use crate::scanner::Scanner;
use crate::stats::Statistics;
use crate::tree::TreeBuilder;
use crate::types::SanitizeStats;

/// Outcome of a completed (non-display-only) merge
#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub files_merged: usize,
    /// Destination path; `None` when the artifact went to stdout
    pub destination: Option<String>,
    pub total_lines: usize,
    pub total_bytes: u64,
    pub sanitize_stats: SanitizeStats,
}

/// Drives one merge run
pub struct Merger<'a> {
    scanner: Scanner<'a>,
    generator: Box<dyn ContentGenerator>,
    tree_builder: Option<TreeBuilder<'a>>,
    list_builder: Option<ListBuilder>,
    progress: ProgressBar,
}

impl<'a> Merger<'a> {
    pub fn new(
        scanner: Scanner<'a>,
        generator: Box<dyn ContentGenerator>,
        tree_builder: Option<TreeBuilder<'a>>,
        list_builder: Option<ListBuilder>,
        progress: ProgressBar,
    ) -> Self {
        Self {
            scanner,
            generator,
            tree_builder,
            list_builder,
            progress,
        }
    }

    /// Run the merge
    ///
    /// Returns `None` when the run printed views only or was cancelled at
    /// the confirmation prompt; otherwise the summary of the written
    /// artifact.
    pub fn merge(
        &self,
        config: &Config,
        custom_rules: Vec<ReplacementRule>,
    ) -> Result<Option<MergeSummary>> {
        let display_only = config.display_only();

        say(config.to_stdout, "Scanning files...");
        let (records, scan_stats) = self.scanner.scan(&config.target_dir);

        say(config.to_stdout, &format!("Found {} files", records.len()));
        if scan_stats.glob_filtered > 0 {
            say(
                config.to_stdout,
                &format!("Filtered by glob: {} files", scan_stats.glob_filtered),
            );
        }
        if scan_stats.ignored > 0 {
            say(
                config.to_stdout,
                &format!("Ignored by patterns: {} files/directories", scan_stats.ignored),
            );
        }

        let tree_output = if config.show_tree {
            self.tree_builder
                .as_ref()
                .map(|builder| builder.build(&config.target_dir))
        } else {
            None
        };

        let list_output = if config.show_list {
            self.list_builder
                .as_ref()
                .map(|builder| builder.build(&records))
        } else {
            None
        };

        if display_only {
            if let Some(tree) = &tree_output {
                println!("\nDirectory tree:");
                println!("{}", tree);
                println!();
            }
            if let Some(list) = &list_output {
                println!("\nFile list:");
                println!("{}", list);
                println!();
            }
            if config.show_stats {
                Statistics::calculate(&records).print();
            }
            return Ok(None);
        }

        // The prompt must happen before any write
        if !config.skip_confirm && !config.to_stdout {
            if let Some(output_file) = &config.output_file {
                if !confirm(output_file)? {
                    println!("Cancelled");
                    return Ok(None);
                }
            }
        }

        say(config.to_stdout, "Merging...");

        let options = GenerateOptions {
            sanitize: config.sanitize,
            custom_rules,
            head_lines: config.head_lines,
            tail_lines: config.tail_lines,
            include_tree: config.show_tree,
            include_list: config.show_list,
            include_stats: config.show_stats,
            include_merge: config.include_merge,
            tree: tree_output,
            list: list_output,
        };

        self.progress.set_length(records.len() as u64);
        let (content, sanitize_stats) =
            self.generator
                .generate(&records, &config.target_dir, &options, &self.progress);
        self.progress.finish_and_clear();

        let totals = Statistics::calculate(&records);

        if config.to_stdout {
            println!("{}", content);
        } else if let Some(output_file) = &config.output_file {
            write_artifact(output_file, &content)?;
        }

        Ok(Some(MergeSummary {
            files_merged: records.len(),
            destination: if config.to_stdout {
                None
            } else {
                config.output_file.clone()
            },
            total_lines: totals.total_lines,
            total_bytes: totals.total_size,
            sanitize_stats,
        }))
    }
}

/// Write the artifact in one scoped operation
fn write_artifact(output_file: &str, content: &str) -> Result<()> {
    let file = File::create(output_file)
        .with_context(|| format!("Cannot write to '{}'", output_file))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Cannot write to '{}'", output_file))?;
    writer
        .flush()
        .with_context(|| format!("Cannot write to '{}'", output_file))?;
    Ok(())
}

fn confirm(output_file: &str) -> Result<bool> {
    print!("Merge into '{}'? (y/n): ", output_file);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(matches!(
        response.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Progress messages go to stderr when the artifact itself uses stdout
fn say(to_stdout: bool, message: &str) {
    if to_stdout {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}
