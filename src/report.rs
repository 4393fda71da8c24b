/*!
 * Reporting functionality for dirmerge
 *
 * Provides functionality for generating formatted reports of merge results
 * using the tabled library for clean, consistent table rendering.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::merger::MergeSummary;
use crate::utils::format_size;

/// Console summary of a completed merge
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Total time of scan plus assembly plus write
    pub duration: Duration,
    /// Everything else comes from the merge itself
    pub summary: MergeSummary,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for merge results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string for the merge result
    pub fn generate_report(&self, report: &MergeReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report
    ///
    /// Goes to stderr when the artifact itself was streamed to stdout.
    pub fn print_report(&self, report: &MergeReport, to_stderr: bool) {
        let rendered = self.generate_report(report);
        if to_stderr {
            eprintln!("\n{}", rendered);
        } else {
            println!("\n{}", rendered);
        }
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &MergeReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let destination = report
            .summary
            .destination
            .clone()
            .unwrap_or_else(|| "(stdout)".to_string());

        let rows = vec![
            SummaryRow {
                key: "📂 Destination".to_string(),
                value: destination,
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Merged".to_string(),
                value: self.format_number(report.summary.files_merged),
            },
            SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: self.format_number(report.summary.total_lines),
            },
            SummaryRow {
                key: "📦 Total Size".to_string(),
                value: format_size(report.summary.total_bytes),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create a sanitization table using the tabled crate
    fn create_sanitize_table(&self, report: &MergeReport) -> Option<String> {
        #[derive(Tabled)]
        struct SanitizeRow {
            #[tabled(rename = "Category")]
            category: String,

            #[tabled(rename = "Matches")]
            matches: String,
        }

        if report.summary.sanitize_stats.is_empty() {
            return None;
        }

        let rows: Vec<SanitizeRow> = report
            .summary
            .sanitize_stats
            .iter()
            .map(|(category, count)| SanitizeRow {
                category: category.clone(),
                matches: self.format_number(*count),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        Some(table.to_string())
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &MergeReport) -> String {
        let summary_table = self.create_summary_table(report);

        match self.create_sanitize_table(report) {
            Some(sanitize_table) => format!(
                "✅  MERGE COMPLETE\n{}\n\n🔒  SANITIZATION MATCHES\n{}",
                summary_table, sanitize_table
            ),
            None => format!("✅  MERGE COMPLETE\n{}", summary_table),
        }
    }
}
