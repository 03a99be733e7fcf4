//! Merge report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Outcome of one `merge_xlsx_files` run.
///
/// The template is never listed in either `files_merged` or `files_skipped`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportMerge {
    /// Non-template inputs whose rows were appended, in input order.
    pub files_merged: Vec<PathBuf>,
    /// Non-template inputs skipped for column-count incompatibility, in input order.
    pub files_skipped: Vec<PathBuf>,
    /// Number of rows appended below the template.
    pub cnt_rows_appended: u64,
    /// Non-fatal warnings (one per skipped file).
    pub warnings: Vec<String>,
}

impl ReportMerge {
    /// Number of merged files.
    pub fn merged_count(&self) -> usize {
        self.files_merged.len()
    }

    /// Number of skipped files.
    pub fn skipped_count(&self) -> usize {
        self.files_skipped.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_files_merged".to_string(), self.merged_count() as u64);
        dict_counts.insert("cnt_files_skipped".to_string(), self.skipped_count() as u64);
        dict_counts.insert("cnt_rows_appended".to_string(), self.cnt_rows_appended);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} merged={} skipped={} rows={} warnings={}",
            dict_counts["cnt_files_merged"],
            dict_counts["cnt_files_skipped"],
            dict_counts["cnt_rows_appended"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[MERGE]"))
    }
}

/// Mutable accumulator filled while the row-append loop runs.
#[derive(Debug, Default, Clone)]
pub struct ReportMergeBuilder {
    /// See [`ReportMerge::files_merged`].
    pub files_merged: Vec<PathBuf>,
    /// See [`ReportMerge::files_skipped`].
    pub files_skipped: Vec<PathBuf>,
    /// See [`ReportMerge::cnt_rows_appended`].
    pub cnt_rows_appended: u64,
    /// See [`ReportMerge::warnings`].
    pub warnings: Vec<String>,
}

impl ReportMergeBuilder {
    /// Record one merged file and the number of rows it contributed.
    pub fn add_merged(&mut self, path: PathBuf, n_rows: u64) {
        self.files_merged.push(path);
        self.cnt_rows_appended += n_rows;
    }

    /// Record one skipped file.
    pub fn add_skipped(&mut self, path: PathBuf) {
        self.files_skipped.push(path);
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportMerge {
        ReportMerge {
            files_merged: self.files_merged,
            files_skipped: self.files_skipped,
            cnt_rows_appended: self.cnt_rows_appended,
            warnings: self.warnings,
        }
    }
}
