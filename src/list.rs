/*!
 * Flat file-list rendering of the scan result
 */

use std::path::PathBuf;

use crate::types::FileRecord;
use crate::utils::relative_to;

/// Renders scanned records as one relative path per line
pub struct ListBuilder {
    base_dir: PathBuf,
}

impl ListBuilder {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Build the list in record order
    pub fn build(&self, records: &[FileRecord]) -> String {
        records
            .iter()
            .map(|record| {
                relative_to(&record.path, &self.base_dir)
                    .unwrap_or_else(|| record.path.display().to_string())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
