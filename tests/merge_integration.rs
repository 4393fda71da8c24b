/*!
 * Integration tests driving a full merge run through the library API
 */

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use indicatif::ProgressBar;
use tempfile::tempdir;

use dirmerge::config::{Config, OutputFormat};
use dirmerge::filter::{GlobFilter, IgnoreFilter};
use dirmerge::generator::{ContentGenerator, MarkdownGenerator, TextGenerator};
use dirmerge::list::ListBuilder;
use dirmerge::merger::Merger;
use dirmerge::scanner::Scanner;
use dirmerge::tree::TreeBuilder;

fn write_file(path: &Path, content: &str) {
    let mut file = File::create(path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

fn config_for(target_dir: &Path, output_file: Option<String>) -> Config {
    Config {
        target_dir: target_dir.to_path_buf(),
        output_file,
        to_stdout: false,
        format: OutputFormat::Text,
        show_tree: false,
        show_list: false,
        show_stats: false,
        include_merge: true,
        glob_patterns: vec![],
        exclude_patterns: vec![],
        ignore_file: None,
        no_auto_ignore: false,
        head_lines: None,
        tail_lines: None,
        sanitize: false,
        replace_file: None,
        skip_confirm: true,
        debug: false,
    }
}

#[test]
fn test_text_merge_writes_artifact() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let dir = source.path();

    write_file(&dir.join("a.py"), "print(1)\n");
    fs::create_dir(dir.join("sub")).unwrap();
    write_file(&dir.join("sub").join("b.txt"), "hello\nworld\n");

    let output_file = dest.path().join("merged.txt");
    let config = config_for(dir, Some(output_file.display().to_string()));

    let glob_filter = GlobFilter::new(&[], dir, false).unwrap();
    let ignore_filter = IgnoreFilter::new(&[], dir, false, false);
    let scanner = Scanner::new(&glob_filter, &ignore_filter, false);

    let merger = Merger::new(
        scanner,
        Box::new(TextGenerator) as Box<dyn ContentGenerator>,
        None,
        None,
        ProgressBar::hidden(),
    );

    let summary = merger.merge(&config, vec![]).unwrap().unwrap();

    assert_eq!(summary.files_merged, 2);
    assert_eq!(summary.destination, Some(output_file.display().to_string()));
    assert!(summary.sanitize_stats.is_empty());

    let artifact = fs::read_to_string(&output_file).unwrap();
    assert!(artifact.contains("--- /a.py ---\nprint(1)\n"));
    assert!(artifact.contains("--- /sub/b.txt ---\nhello\nworld\n"));
}

#[test]
fn test_markdown_merge_with_views_and_sanitize() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let dir = source.path();

    write_file(&dir.join("creds.txt"), "contact: user@example.com\n");

    let output_file = dest.path().join("merged.md");
    let mut config = config_for(dir, Some(output_file.display().to_string()));
    config.format = OutputFormat::Markdown;
    config.show_tree = true;
    config.show_list = true;
    config.show_stats = true;
    config.sanitize = true;

    let glob_filter = GlobFilter::new(&[], dir, false).unwrap();
    let ignore_filter = IgnoreFilter::new(&[], dir, false, false);
    let scanner = Scanner::new(&glob_filter, &ignore_filter, false);
    let tree_builder = TreeBuilder::new(&ignore_filter, &glob_filter);
    let list_builder = ListBuilder::new(dir.to_path_buf());

    let merger = Merger::new(
        scanner,
        Box::new(MarkdownGenerator) as Box<dyn ContentGenerator>,
        Some(tree_builder),
        Some(list_builder),
        ProgressBar::hidden(),
    );

    let summary = merger.merge(&config, vec![]).unwrap().unwrap();
    assert_eq!(summary.sanitize_stats.get("Email addresses"), Some(&1));

    let artifact = fs::read_to_string(&output_file).unwrap();
    assert!(artifact.contains("## Summary"));
    assert!(artifact.contains("## Directory Structure"));
    assert!(artifact.contains("creds.txt"));
    assert!(artifact.contains("## File List"));
    assert!(artifact.contains("### `/creds.txt`"));
    assert!(artifact.contains("[REDACTED_EMAIL_1]"));
    assert!(!artifact.contains("user@example.com"));
}

#[test]
fn test_display_only_run_writes_nothing() {
    let source = tempdir().unwrap();
    let dir = source.path();

    write_file(&dir.join("a.txt"), "a\n");

    let mut config = config_for(dir, None);
    config.show_stats = true;
    assert!(config.display_only());

    let glob_filter = GlobFilter::new(&[], dir, false).unwrap();
    let ignore_filter = IgnoreFilter::new(&[], dir, false, false);
    let scanner = Scanner::new(&glob_filter, &ignore_filter, false);

    let merger = Merger::new(
        scanner,
        Box::new(TextGenerator) as Box<dyn ContentGenerator>,
        None,
        None,
        ProgressBar::hidden(),
    );

    let summary = merger.merge(&config, vec![]).unwrap();
    assert!(summary.is_none());
}

#[test]
fn test_merge_respects_gitignore_patterns() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let dir = source.path();

    write_file(&dir.join("keep.py"), "keep\n");
    write_file(&dir.join("drop.log"), "drop\n");
    write_file(&dir.join(".gitignore"), "*.log\n");

    let output_file = dest.path().join("merged.txt");
    let config = config_for(dir, Some(output_file.display().to_string()));

    let ignore_patterns = IgnoreFilter::load_patterns(&dir.join(".gitignore")).unwrap();
    let glob_filter = GlobFilter::new(&[], dir, false).unwrap();
    let ignore_filter = IgnoreFilter::new(&ignore_patterns, dir, false, true);
    let scanner = Scanner::new(&glob_filter, &ignore_filter, false);

    let merger = Merger::new(
        scanner,
        Box::new(TextGenerator) as Box<dyn ContentGenerator>,
        None,
        None,
        ProgressBar::hidden(),
    );

    let summary = merger.merge(&config, vec![]).unwrap().unwrap();
    assert_eq!(summary.files_merged, 1);

    let artifact = fs::read_to_string(&output_file).unwrap();
    assert!(artifact.contains("keep.py"));
    assert!(!artifact.contains("drop.log"));
    assert!(!artifact.contains(".gitignore"));
}
