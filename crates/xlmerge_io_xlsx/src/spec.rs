//! Merge specification models and top-level error types.

use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region CellValueSpecification

/// Typed scalar held by one worksheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    Empty,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Excel serial date/time value.
    Date(f64),
    /// Boolean value.
    Boolean(bool),
}

impl EnumCellValue {
    /// Whether the cell carries no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Used-range end of a worksheet, as 1-based absolute coordinates.
///
/// `(0, 0)` denotes an empty worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecSheetExtent {
    /// Last used row (1-based).
    pub row_max: usize,
    /// Last used column (1-based).
    pub col_max: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergeOptions

/// Merge behavior flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecXlsxMergeOptions {
    /// Keep row 1 of every non-template file. The template header is always kept.
    pub if_keep_headers: bool,
    /// Merge files whose column count differs from the template instead of skipping them.
    pub if_ignore_column_differences: bool,
    /// Append a column holding the source file path of each row.
    pub if_add_file_names: bool,
}

/// One merge call: ordered inputs (first is the template) and output target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxMergeRequest {
    /// Ordered input paths; `files_in[0]` is the template.
    pub files_in: Vec<PathBuf>,
    /// Output path, replaced if it exists.
    pub file_out: PathBuf,
    /// Merge behavior flags.
    pub options: SpecXlsxMergeOptions,
}

impl SpecXlsxMergeRequest {
    /// Build a request with default options.
    pub fn new<I, P, Q>(files_in: I, file_out: Q) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        Self {
            files_in: files_in.into_iter().map(Into::into).collect(),
            file_out: file_out.into(),
            options: SpecXlsxMergeOptions::default(),
        }
    }

    /// Replace merge options.
    pub fn with_options(mut self, options: SpecXlsxMergeOptions) -> Self {
        self.options = options;
        self
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// "Merge call failed" errors. Column mismatches are not errors; they end up
/// in [`crate::report::ReportMerge::files_skipped`].
#[derive(Debug, thiserror::Error)]
pub enum MergeXlsxError {
    /// Fewer than two input files.
    #[error("There must be at least 2 input files, got {count}.")]
    InsufficientInput {
        /// Number of supplied input files.
        count: usize,
    },
    /// Input path does not exist or is not a regular file.
    #[error("File not found: '{}'", .0.display())]
    FileNotFound(PathBuf),
    /// Input path does not carry the `.xlsx` extension.
    #[error("The file '{}' is invalid. Can only merge .xlsx files.", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Input file could not be parsed as an xlsx workbook.
    #[error("Failed to read workbook {}: {message}", path.display())]
    CorruptFile {
        /// Offending input path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Output workbook could not be written.
    #[error("Failed to save workbook {}: {message}", path.display())]
    Persistence {
        /// Output path.
        path: PathBuf,
        /// Underlying writer error text.
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{EnumCellValue, MergeXlsxError, SpecXlsxMergeOptions, SpecXlsxMergeRequest};

    #[test]
    fn request_new_collects_paths_with_default_options() {
        let request = SpecXlsxMergeRequest::new(["a.xlsx", "b.xlsx"], "out.xlsx");
        assert_eq!(
            request.files_in,
            vec![PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")]
        );
        assert_eq!(request.file_out, PathBuf::from("out.xlsx"));
        assert_eq!(request.options, SpecXlsxMergeOptions::default());
    }

    #[test]
    fn error_messages_name_offending_path() {
        let err = MergeXlsxError::FileNotFound(PathBuf::from("missing.xlsx"));
        assert_eq!(err.to_string(), "File not found: 'missing.xlsx'");

        let err = MergeXlsxError::UnsupportedFormat(PathBuf::from("data.csv"));
        assert_eq!(
            err.to_string(),
            "The file 'data.csv' is invalid. Can only merge .xlsx files."
        );
    }

    #[test]
    fn cell_value_conversions() {
        assert_eq!(EnumCellValue::from("x"), EnumCellValue::Text("x".to_string()));
        assert_eq!(EnumCellValue::from(2.5), EnumCellValue::Number(2.5));
        assert_eq!(EnumCellValue::from(true), EnumCellValue::Boolean(true));
        assert!(EnumCellValue::default().is_empty());
    }
}
