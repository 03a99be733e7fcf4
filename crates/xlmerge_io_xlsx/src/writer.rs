//! In-memory template workbook and its xlsx serializer.

use std::collections::BTreeMap;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::conf::{C_NUM_FORMAT_DATE, C_NUM_FORMAT_DATETIME, C_SHEET_NAME_DEFAULT};
use crate::reader::XlsxSheetSource;
use crate::spec::{EnumCellValue, MergeXlsxError, SpecSheetExtent};
use crate::util::{cast_col_num, cast_row_num};

/// Write capability the merge engine needs from the template workbook.
pub trait XlsxSheetTemplate {
    /// Current used-range end, reflecting every cell set so far.
    fn extent(&self) -> SpecSheetExtent;
    /// Set 1-based `(row, col)`; positions past the extent grow the sheet.
    fn set_cell_value(&mut self, row: usize, col: usize, value: EnumCellValue);
    /// Persist the workbook to `path`, replacing any existing file.
    fn save_as(&mut self, path: &Path) -> Result<(), MergeXlsxError>;
}

/// Sparse single-sheet grid, serialized with `rust_xlsxwriter`.
///
/// Only non-empty cells are stored. Setting an `Empty` value clears the cell
/// but still extends the extent; empty cells are not written on save.
#[derive(Debug, Clone, Default)]
pub struct XlsxTemplateWriter {
    sheet_name: String,
    rows: BTreeMap<usize, BTreeMap<usize, EnumCellValue>>,
    extent: SpecSheetExtent,
}

impl XlsxTemplateWriter {
    /// Create an empty template with the given sheet name.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows: BTreeMap::new(),
            extent: SpecSheetExtent::default(),
        }
    }

    /// Copy the whole used range of `source` into a new template.
    ///
    /// The template extent equals the source extent even when the trailing
    /// cells are blank.
    pub fn from_source<S: XlsxSheetSource>(source: &S) -> Self {
        let mut template = Self::new(source.sheet_name());
        let extent = source.extent();
        for row in 1..=extent.row_max {
            for col in 1..=extent.col_max {
                let value = source.cell_value(row, col);
                if !value.is_empty() {
                    template.set_cell_value(row, col, value);
                }
            }
        }
        template.grow_extent(extent.row_max, extent.col_max);
        template
    }

    fn grow_extent(&mut self, row: usize, col: usize) {
        self.extent.row_max = self.extent.row_max.max(row);
        self.extent.col_max = self.extent.col_max.max(col);
    }

    /// Worksheet name used on save.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Cell value at 1-based `(row, col)`.
    pub fn cell_value(&self, row: usize, col: usize) -> EnumCellValue {
        self.rows
            .get(&row)
            .and_then(|dict_cells| dict_cells.get(&col))
            .cloned()
            .unwrap_or_default()
    }

    /// Dense copy of the grid over the current extent.
    pub fn to_rows(&self) -> Vec<Vec<EnumCellValue>> {
        let extent = self.extent();
        (1..=extent.row_max)
            .map(|row| {
                (1..=extent.col_max)
                    .map(|col| self.cell_value(row, col))
                    .collect()
            })
            .collect()
    }

    fn write_worksheet(&self, worksheet: &mut Worksheet) -> Result<(), String> {
        let fmt_date = Format::new().set_num_format(C_NUM_FORMAT_DATE);
        let fmt_datetime = Format::new().set_num_format(C_NUM_FORMAT_DATETIME);

        for (row, dict_cells) in &self.rows {
            for (col, value) in dict_cells {
                let row_num = cast_row_num(*row)?;
                let col_num = cast_col_num(*col)?;
                match value {
                    EnumCellValue::Empty => {}
                    EnumCellValue::Text(val) => {
                        worksheet
                            .write_string(row_num, col_num, val)
                            .map_err(derive_xlsx_error_text)?;
                    }
                    EnumCellValue::Number(val) => {
                        worksheet
                            .write_number(row_num, col_num, *val)
                            .map_err(derive_xlsx_error_text)?;
                    }
                    EnumCellValue::Date(val) => {
                        let format = if val.fract() == 0.0 {
                            &fmt_date
                        } else {
                            &fmt_datetime
                        };
                        worksheet
                            .write_number_with_format(row_num, col_num, *val, format)
                            .map_err(derive_xlsx_error_text)?;
                    }
                    EnumCellValue::Boolean(val) => {
                        worksheet
                            .write_boolean(row_num, col_num, *val)
                            .map_err(derive_xlsx_error_text)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl XlsxSheetTemplate for XlsxTemplateWriter {
    fn extent(&self) -> SpecSheetExtent {
        self.extent
    }

    fn set_cell_value(&mut self, row: usize, col: usize, value: EnumCellValue) {
        self.grow_extent(row, col);
        if value.is_empty() {
            if let Some(dict_cells) = self.rows.get_mut(&row) {
                dict_cells.remove(&col);
                if dict_cells.is_empty() {
                    self.rows.remove(&row);
                }
            }
            return;
        }
        self.rows.entry(row).or_default().insert(col, value);
    }

    fn save_as(&mut self, path: &Path) -> Result<(), MergeXlsxError> {
        let derive_persistence = |message: String| MergeXlsxError::Persistence {
            path: path.to_path_buf(),
            message,
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        if !self.sheet_name.is_empty()
            && self.sheet_name != C_SHEET_NAME_DEFAULT
            && let Err(err) = worksheet.set_name(self.sheet_name.as_str())
        {
            tracing::warn!(sheet = %self.sheet_name, "keeping default sheet name: {err}");
        }
        self.write_worksheet(worksheet).map_err(derive_persistence)?;
        workbook
            .save(path)
            .map_err(|e| derive_persistence(derive_xlsx_error_text(e)))?;

        tracing::debug!(path = %path.display(), "saved workbook");
        Ok(())
    }
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}
