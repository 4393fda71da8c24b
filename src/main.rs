/*!
 * Command-line interface for dirmerge
 */

use std::io;
use std::process;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use dirmerge::config::{Args, Config, ConfigFile, OutputFormat};
use dirmerge::error::Result;
use dirmerge::filter::{GlobFilter, IgnoreFilter};
use dirmerge::generator::{ContentGenerator, MarkdownGenerator, TextGenerator};
use dirmerge::list::ListBuilder;
use dirmerge::merger::Merger;
use dirmerge::report::{MergeReport, ReportFormat, Reporter};
use dirmerge::sanitize::{ReplacementRule, Sanitizer};
use dirmerge::scanner::Scanner;
use dirmerge::tree::TreeBuilder;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Shell completion generation short-circuits everything else
    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    let file_config = ConfigFile::load(args.config.as_deref());
    let config = Config::from_args(args, file_config);
    config.validate()?;

    // Resolve ignore files: an explicit file wins over auto-detection
    let mut ignore_files = Vec::new();
    let mut auto_vcs_ignore = false;

    if let Some(ignore_file) = &config.ignore_file {
        if !ignore_file.exists() {
            eprintln!("Warning: Ignore file not found: {}", ignore_file.display());
        } else {
            if config.debug {
                eprintln!(
                    "[DEBUG] Using specified ignore file: {}",
                    ignore_file.display()
                );
            }
            ignore_files.push(ignore_file.clone());
        }
    }

    if !config.no_auto_ignore && config.ignore_file.is_none() {
        if let Some(auto_ignore) = IgnoreFilter::auto_detect_ignore_file(&config.target_dir) {
            println!("Auto-detected and using: {}", auto_ignore.display());
            ignore_files.push(auto_ignore);
            auto_vcs_ignore = true;
        }
    }

    let mut ignore_patterns = IgnoreFilter::load_patterns_from_multiple(&ignore_files);
    if !config.exclude_patterns.is_empty() {
        if config.debug {
            eprintln!("[DEBUG] Exclude patterns: {:?}", config.exclude_patterns);
        }
        ignore_patterns.extend(config.exclude_patterns.iter().cloned());
    }

    let glob_filter = GlobFilter::new(&config.glob_patterns, &config.target_dir, config.debug)?;
    let ignore_filter = IgnoreFilter::new(
        &ignore_patterns,
        &config.target_dir,
        config.debug,
        auto_vcs_ignore,
    );

    let scanner = Scanner::new(&glob_filter, &ignore_filter, config.debug);

    let tree_builder = if config.show_tree {
        Some(TreeBuilder::new(&ignore_filter, &glob_filter))
    } else {
        None
    };
    let list_builder = if config.show_list {
        Some(ListBuilder::new(config.target_dir.clone()))
    } else {
        None
    };

    let generator: Box<dyn ContentGenerator> = match config.format {
        OutputFormat::Text => Box::new(TextGenerator),
        OutputFormat::Markdown => Box::new(MarkdownGenerator),
    };

    let custom_rules: Vec<ReplacementRule> = match &config.replace_file {
        Some(replace_file) if !replace_file.exists() => {
            eprintln!(
                "Warning: Replacement patterns file not found: {}",
                replace_file.display()
            );
            Vec::new()
        }
        Some(replace_file) => Sanitizer::load_replacement_rules(replace_file)?,
        None => Vec::new(),
    };

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {wide_msg:.dim.white} {pos}/{len}")
            .unwrap(),
    );

    let merger = Merger::new(scanner, generator, tree_builder, list_builder, progress);

    let start_time = Instant::now();
    let summary = merger.merge(&config, custom_rules)?;

    if let Some(summary) = summary {
        let report = MergeReport {
            duration: start_time.elapsed(),
            summary,
        };
        Reporter::new(ReportFormat::ConsoleTable).print_report(&report, config.to_stdout);
    }

    Ok(())
}
