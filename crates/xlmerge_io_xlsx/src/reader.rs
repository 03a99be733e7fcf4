//! Read-only access to the first worksheet of an xlsx workbook.

use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Xlsx, XlsxError, open_workbook};

use crate::spec::{EnumCellValue, MergeXlsxError, SpecSheetExtent};

/// Read capability the merge engine needs from an opened workbook.
///
/// Only the first worksheet is exposed. Closing is dropping.
pub trait XlsxSheetSource {
    /// Path the workbook was opened from.
    fn path(&self) -> &Path;
    /// Name of the first worksheet.
    fn sheet_name(&self) -> &str;
    /// Used-range end of the first worksheet.
    fn extent(&self) -> SpecSheetExtent;
    /// Cell value at 1-based `(row, col)`; `Empty` outside the used range.
    fn cell_value(&self, row: usize, col: usize) -> EnumCellValue;
}

/// Calamine-backed first-sheet reader.
#[derive(Debug)]
pub struct XlsxSheetReader {
    path_file_in: PathBuf,
    sheet_name: String,
    range: Range<Data>,
}

impl XlsxSheetReader {
    /// Open `path` and load its first worksheet into memory.
    ///
    /// Fails with [`MergeXlsxError::CorruptFile`] when the file is not a valid
    /// xlsx container or holds no worksheet.
    pub fn open(path: &Path) -> Result<Self, MergeXlsxError> {
        let derive_corrupt = |message: String| MergeXlsxError::CorruptFile {
            path: path.to_path_buf(),
            message,
        };

        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e| derive_corrupt(derive_xlsx_error_text(e)))?;
        let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
            return Err(derive_corrupt("workbook contains no worksheet".to_string()));
        };
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| derive_corrupt(derive_xlsx_error_text(e)))?;

        tracing::debug!(
            path = %path.display(),
            sheet = %sheet_name,
            "opened workbook"
        );

        Ok(Self {
            path_file_in: path.to_path_buf(),
            sheet_name,
            range,
        })
    }
}

impl XlsxSheetSource for XlsxSheetReader {
    fn path(&self) -> &Path {
        &self.path_file_in
    }

    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    fn extent(&self) -> SpecSheetExtent {
        match self.range.end() {
            Some((row_idx, col_idx)) => SpecSheetExtent {
                row_max: row_idx as usize + 1,
                col_max: col_idx as usize + 1,
            },
            None => SpecSheetExtent::default(),
        }
    }

    fn cell_value(&self, row: usize, col: usize) -> EnumCellValue {
        if row == 0 || col == 0 {
            return EnumCellValue::Empty;
        }
        let (Ok(row_idx), Ok(col_idx)) = (u32::try_from(row - 1), u32::try_from(col - 1)) else {
            return EnumCellValue::Empty;
        };
        self.range
            .get_value((row_idx, col_idx))
            .map(convert_calamine_data)
            .unwrap_or_default()
    }
}

/// Map a calamine cell onto the merge cell model.
///
/// Durations (elapsed-time formats such as `[h]:mm`) are carried as plain
/// numbers of days, not dates. ISO date/duration strings and error cells are
/// carried as text.
pub fn convert_calamine_data(data: &Data) -> EnumCellValue {
    match data {
        Data::Empty => EnumCellValue::Empty,
        Data::String(s) => EnumCellValue::Text(s.clone()),
        Data::Float(n) => EnumCellValue::Number(*n),
        Data::Int(n) => EnumCellValue::Number(*n as f64),
        Data::Bool(b) => EnumCellValue::Boolean(*b),
        Data::DateTime(dt) if dt.is_duration() => EnumCellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => EnumCellValue::Date(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => EnumCellValue::Text(s.clone()),
        Data::Error(e) => EnumCellValue::Text(e.to_string()),
    }
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx read error: {err}")
}
