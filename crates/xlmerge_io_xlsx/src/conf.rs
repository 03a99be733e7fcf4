//! XLSX merge constants and default preset factories.

use crate::spec::SpecXlsxMergeOptions;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Minimum number of input files (template + at least one source).
pub const N_FILES_IN_MIN: usize = 2;

/// Only accepted input extension (compared case-sensitively, without dot).
pub const C_EXT_XLSX: &str = "xlsx";
/// Fallback sheet name when the template sheet name is unusable.
pub const C_SHEET_NAME_DEFAULT: &str = "Sheet1";

/// Number format for date cells without a time component.
pub const C_NUM_FORMAT_DATE: &str = "yyyy-mm-dd";
/// Number format for date cells with a time component.
pub const C_NUM_FORMAT_DATETIME: &str = "yyyy-mm-dd hh:mm:ss";

/// Build default merge options (all flags off).
pub fn derive_default_xlsx_merge_options() -> SpecXlsxMergeOptions {
    SpecXlsxMergeOptions::default()
}
