/*!
 * Configuration handling for dirmerge
 *
 * Command-line arguments are merged with an optional JSON configuration
 * file; explicit arguments always win. List-valued options accept either a
 * comma-separated string or a native array in the file.
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use serde::Deserialize;

use crate::error::Result;

/// Output rendering selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Markdown,
}

/// CLI spelling of the output format (`md` is shorthand for `markdown`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Markdown,
    Md,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Markdown | FormatArg::Md => OutputFormat::Markdown,
        }
    }
}

/// Command-line arguments for dirmerge
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dirmerge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Merge all text files in a directory into one output",
    long_about = "Merges the text files of a directory tree into a single plain-text or \
Markdown artifact, with gitignore-style filtering, optional redaction of sensitive \
content, head/tail line limits and optional tree, list and statistics views."
)]
pub struct Args {
    /// Directory to search for text files
    #[clap(short = 'i', long = "input", value_name = "DIR", help_heading = "Input/Output")]
    pub target_dir: PathBuf,

    /// Output file path
    #[clap(short = 'o', long = "output", value_name = "FILE", help_heading = "Input/Output")]
    pub output_file: Option<String>,

    /// Output to stdout instead of a file
    #[clap(long, help_heading = "Input/Output")]
    pub stdout: bool,

    /// Output format
    #[clap(
        short = 'f',
        long,
        value_enum,
        default_value_t = FormatArg::Text,
        help_heading = "Input/Output"
    )]
    pub format: FormatArg,

    /// Include directory tree structure
    #[clap(short = 't', long, help_heading = "Information inclusion")]
    pub tree: bool,

    /// Include file list
    #[clap(short = 'l', long, help_heading = "Information inclusion")]
    pub list: bool,

    /// Include file statistics
    #[clap(long, help_heading = "Information inclusion")]
    pub stats: bool,

    /// Exclude file contents (only output the requested views)
    #[clap(long = "no-merge", help_heading = "Information inclusion")]
    pub no_merge: bool,

    /// File patterns to match (e.g. '*.py' 'src/**/*.js')
    #[clap(
        short = 'g',
        long = "glob",
        value_name = "PATTERN",
        num_args = 1..,
        value_delimiter = ',',
        help_heading = "Filtering"
    )]
    pub glob: Option<Vec<String>>,

    /// Ignore patterns file (default: auto-detect .gitignore)
    #[clap(long = "ignore", value_name = "FILE", help_heading = "Filtering")]
    pub ignore_file: Option<PathBuf>,

    /// Exclude patterns (e.g. 'README.md' '*.log' 'temp/*')
    #[clap(
        short = 'x',
        long = "exclude",
        value_name = "PATTERN",
        num_args = 1..,
        value_delimiter = ',',
        help_heading = "Filtering"
    )]
    pub exclude: Option<Vec<String>>,

    /// Limit each file to its first N lines
    #[clap(long, value_name = "N", help_heading = "Filtering")]
    pub head: Option<usize>,

    /// Limit each file to its last N lines
    #[clap(long, value_name = "N", help_heading = "Filtering")]
    pub tail: Option<usize>,

    /// Disable automatic .gitignore detection
    #[clap(long = "no-auto-ignore", help_heading = "Filtering")]
    pub no_auto_ignore: bool,

    /// Auto-sanitize sensitive information
    #[clap(short = 's', long, help_heading = "Sanitization")]
    pub sanitize: bool,

    /// Custom replacement patterns file
    #[clap(short = 'r', long = "replace", value_name = "FILE", help_heading = "Sanitization")]
    pub replace_file: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[clap(short = 'y', long, help_heading = "Execution control")]
    pub yes: bool,

    /// Show debug information
    #[clap(short = 'd', long, help_heading = "Execution control")]
    pub debug: bool,

    /// Configuration file path
    #[clap(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum, value_name = "SHELL")]
    pub generate: Option<Shell>,
}

/// A list-valued option in the configuration file: either a
/// comma-separated string or a native array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    String(String),
    List(Vec<String>),
}

impl StringOrList {
    /// Normalize to a list of trimmed, non-empty pattern strings
    pub fn into_patterns(self) -> Vec<String> {
        match self {
            StringOrList::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            StringOrList::List(list) => list
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

/// Optional JSON configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub yes: bool,
    pub tree: bool,
    pub list: bool,
    pub stats: bool,
    pub sanitize: bool,
    pub debug: bool,
    pub no_merge: bool,
    pub ignore_file: Option<String>,
    pub replace_file: Option<String>,
    pub glob: Option<StringOrList>,
    pub exclude: Option<StringOrList>,
}

/// Candidate configuration files searched when `--config` is absent
const DEFAULT_CONFIG_FILES: &[&str] = &[".dirmerge.json", "dirmerge.json"];

impl ConfigFile {
    /// Load the configuration file, or an empty configuration
    ///
    /// Unreadable or unparsable candidates produce a warning and are
    /// treated as absent.
    pub fn load(config_path: Option<&Path>) -> Self {
        let candidates: Vec<PathBuf> = match config_path {
            Some(path) => vec![path.to_path_buf()],
            None => DEFAULT_CONFIG_FILES.iter().map(PathBuf::from).collect(),
        };

        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match fs::read_to_string(&candidate) {
                Ok(raw) => match serde_json::from_str::<ConfigFile>(&raw) {
                    Ok(config) => {
                        println!("Loaded config from: {}", candidate.display());
                        return config;
                    }
                    Err(e) => {
                        eprintln!(
                            "Warning: Error parsing config file {}: {}",
                            candidate.display(),
                            e
                        );
                    }
                },
                Err(e) => {
                    eprintln!(
                        "Warning: Error reading config file {}: {}",
                        candidate.display(),
                        e
                    );
                }
            }
        }

        ConfigFile::default()
    }
}

/// Application configuration after CLI/file merging
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to scan
    pub target_dir: PathBuf,
    /// Destination file, if any
    pub output_file: Option<String>,
    /// Write the artifact to stdout instead of a file
    pub to_stdout: bool,
    /// Output rendering
    pub format: OutputFormat,
    pub show_tree: bool,
    pub show_list: bool,
    pub show_stats: bool,
    /// Include the file bodies section
    pub include_merge: bool,
    /// Include patterns (empty means match-all)
    pub glob_patterns: Vec<String>,
    /// CLI-level exclude patterns
    pub exclude_patterns: Vec<String>,
    /// Explicit ignore file
    pub ignore_file: Option<PathBuf>,
    /// Disable automatic .gitignore discovery
    pub no_auto_ignore: bool,
    pub head_lines: Option<usize>,
    pub tail_lines: Option<usize>,
    /// Run the automatic sanitizer
    pub sanitize: bool,
    /// Custom replacement rules file
    pub replace_file: Option<PathBuf>,
    /// Skip the confirmation prompt
    pub skip_confirm: bool,
    pub debug: bool,
}

impl Config {
    /// Merge command-line arguments with the configuration file
    ///
    /// Explicit arguments always take precedence; file booleans only apply
    /// when the flag was not given.
    pub fn from_args(args: Args, file: ConfigFile) -> Self {
        Self {
            target_dir: args.target_dir,
            output_file: args.output_file,
            to_stdout: args.stdout,
            format: args.format.into(),
            show_tree: args.tree || file.tree,
            show_list: args.list || file.list,
            show_stats: args.stats || file.stats,
            include_merge: !(args.no_merge || file.no_merge),
            glob_patterns: args
                .glob
                .or_else(|| file.glob.map(StringOrList::into_patterns))
                .unwrap_or_default(),
            exclude_patterns: args
                .exclude
                .or_else(|| file.exclude.map(StringOrList::into_patterns))
                .unwrap_or_default(),
            ignore_file: args.ignore_file.or(file.ignore_file.map(PathBuf::from)),
            no_auto_ignore: args.no_auto_ignore,
            head_lines: args.head,
            tail_lines: args.tail,
            sanitize: args.sanitize || file.sanitize,
            replace_file: args.replace_file.or(file.replace_file.map(PathBuf::from)),
            skip_confirm: args.yes || file.yes,
            debug: args.debug || file.debug,
        }
    }

    /// Whether this run only prints views and writes no artifact
    pub fn display_only(&self) -> bool {
        (self.show_tree || self.show_list || self.show_stats)
            && self.output_file.is_none()
            && !self.to_stdout
    }

    /// Validate the configuration before any filesystem work
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.to_stdout || self.display_only() || self.output_file.is_some(),
            Config,
            "--output/-o is required unless using --stdout, --tree, --list, or --stats"
        );

        if let Some(output_file) = &self.output_file {
            crate::ensure!(
                !output_file.trim().is_empty(),
                Config,
                "Output file path cannot be empty"
            );
        }

        crate::ensure!(
            !(self.head_lines.is_some() && self.tail_lines.is_some()),
            Config,
            "Cannot use both --head and --tail at the same time"
        );

        crate::ensure!(
            self.target_dir.exists(),
            Config,
            "Input directory does not exist: {}",
            self.target_dir.display()
        );

        crate::ensure!(
            self.target_dir.is_dir(),
            Config,
            "Input path is not a directory: {}",
            self.target_dir.display()
        );

        Ok(())
    }
}
