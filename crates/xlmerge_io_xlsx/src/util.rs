//! Stateless helper utilities used by the merge engine.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::conf::{C_EXT_XLSX, N_FILES_IN_MIN, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::MergeXlsxError;

////////////////////////////////////////////////////////////////////////////////
// #region InputValidation

/// Whether `path` ends with the case-sensitive `.xlsx` extension.
pub fn is_xlsx_extension(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(C_EXT_XLSX))
}

/// Validate the whole input list before any workbook is opened.
///
/// Files are checked in order; for each file existence is checked before the
/// extension. The first violation is returned.
pub fn validate_merge_inputs(files_in: &[PathBuf]) -> Result<(), MergeXlsxError> {
    if files_in.len() < N_FILES_IN_MIN {
        return Err(MergeXlsxError::InsufficientInput {
            count: files_in.len(),
        });
    }
    for path_file in files_in {
        if !path_file.is_file() {
            return Err(MergeXlsxError::FileNotFound(path_file.clone()));
        }
        if !is_xlsx_extension(path_file) {
            return Err(MergeXlsxError::UnsupportedFormat(path_file.clone()));
        }
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowPlacement

/// Leading rows skipped in non-template files.
pub fn calculate_header_offset(if_keep_headers: bool) -> usize {
    if if_keep_headers { 0 } else { 1 }
}

/// Whether a source with `n_cols_src` columns may be appended.
pub fn is_column_compatible(
    n_cols_src: usize,
    n_cols_reference: usize,
    if_ignore_column_differences: bool,
) -> bool {
    n_cols_src == n_cols_reference || if_ignore_column_differences
}

/// Template row (1-based) receiving source row index `row_idx_src` (0-based).
pub fn calculate_target_row(
    row_max_template: usize,
    row_idx_src: usize,
    header_offset: usize,
) -> usize {
    row_max_template + row_idx_src + 1 - header_offset
}

/// Number of source rows copied for a source with `row_max_src` rows.
pub fn calculate_rows_copied(row_max_src: usize, header_offset: usize) -> usize {
    row_max_src.saturating_sub(header_offset)
}

/// Path text written into the annotation column.
pub fn derive_path_text(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Casting

/// Convert 1-based row number to rust_xlsxwriter 0-based row index.
pub fn cast_row_num(row: usize) -> Result<u32, String> {
    if row == 0 || row > N_NROWS_EXCEL_MAX {
        return Err(format!(
            "row {row} is outside the Excel range 1..={N_NROWS_EXCEL_MAX}"
        ));
    }
    u32::try_from(row - 1).map_err(|_| format!("row index overflow: {row}"))
}

/// Convert 1-based column number to rust_xlsxwriter 0-based column index.
pub fn cast_col_num(col: usize) -> Result<u16, String> {
    if col == 0 || col > N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "column {col} is outside the Excel range 1..={N_NCOLS_EXCEL_MAX}"
        ));
    }
    u16::try_from(col - 1).map_err(|_| format!("column index overflow: {col}"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
