//! Row-append merge of several xlsx files into the first one.

use std::ops::RangeInclusive;
use std::path::Path;

use crate::reader::{XlsxSheetReader, XlsxSheetSource};
use crate::report::{ReportMerge, ReportMergeBuilder};
use crate::spec::{EnumCellValue, MergeXlsxError, SpecXlsxMergeRequest};
use crate::util::{
    calculate_header_offset, calculate_rows_copied, calculate_target_row, derive_path_text,
    is_column_compatible, validate_merge_inputs,
};
use crate::writer::{XlsxSheetTemplate, XlsxTemplateWriter};

/// Opens workbooks for the merge engine.
pub trait XlsxMergeBackend {
    /// Read-only workbook type for non-template inputs.
    type Source: XlsxSheetSource;
    /// Mutable workbook type for the template.
    type Template: XlsxSheetTemplate;

    /// Open a non-template input read-only.
    fn open_source(&self, path: &Path) -> Result<Self::Source, MergeXlsxError>;
    /// Open the template input for mutation.
    fn open_template(&self, path: &Path) -> Result<Self::Template, MergeXlsxError>;
}

/// Default backend: calamine for reading, rust_xlsxwriter for saving.
#[derive(Debug, Default, Clone, Copy)]
pub struct BackendXlsx;

impl XlsxMergeBackend for BackendXlsx {
    type Source = XlsxSheetReader;
    type Template = XlsxTemplateWriter;

    fn open_source(&self, path: &Path) -> Result<Self::Source, MergeXlsxError> {
        XlsxSheetReader::open(path)
    }

    fn open_template(&self, path: &Path) -> Result<Self::Template, MergeXlsxError> {
        let reader = XlsxSheetReader::open(path)?;
        Ok(XlsxTemplateWriter::from_source(&reader))
    }
}

/// Merge `request.files_in[1..]` into a copy of `request.files_in[0]` and save
/// it to `request.file_out`.
///
/// This function performs:
/// 1. Validation of the whole input list (count, existence, `.xlsx` extension).
/// 2. Template preparation (optional path annotation of rows `2..=row_max`).
/// 3. Row append of every column-compatible file, one file open at a time.
/// 4. Save of the template to `file_out`.
///
/// Column mismatches are not errors: the file is listed in
/// [`ReportMerge::files_skipped`]. Any [`MergeXlsxError`] means no output was
/// produced by this call.
pub fn merge_xlsx_files(request: &SpecXlsxMergeRequest) -> Result<ReportMerge, MergeXlsxError> {
    merge_xlsx_files_with(&BackendXlsx, request)
}

/// [`merge_xlsx_files`] with an explicit workbook backend.
pub fn merge_xlsx_files_with<B>(
    backend: &B,
    request: &SpecXlsxMergeRequest,
) -> Result<ReportMerge, MergeXlsxError>
where
    B: XlsxMergeBackend,
{
    validate_merge_inputs(&request.files_in)?;
    let Some((path_file_template, l_files_src)) = request.files_in.split_first() else {
        return Err(MergeXlsxError::InsufficientInput { count: 0 });
    };

    let options = request.options;
    let header_offset = calculate_header_offset(options.if_keep_headers);
    tracing::info!(
        template = %path_file_template.display(),
        n_files = request.files_in.len(),
        output = %request.file_out.display(),
        "merging xlsx files"
    );

    let mut template = backend.open_template(path_file_template)?;
    let extent_template = template.extent();
    let n_cols_reference = extent_template.col_max;

    if options.if_add_file_names {
        annotate_rows(
            &mut template,
            2..=extent_template.row_max,
            n_cols_reference + 1,
            path_file_template,
        );
    }

    let mut builder_report = ReportMergeBuilder::default();
    for path_file_src in l_files_src {
        let row_max_template = template.extent().row_max;
        let source = backend.open_source(path_file_src)?;
        let extent_src = source.extent();
        tracing::debug!(
            path = %path_file_src.display(),
            row_max = extent_src.row_max,
            col_max = extent_src.col_max,
            row_max_template,
            "processing file"
        );

        if !is_column_compatible(
            extent_src.col_max,
            n_cols_reference,
            options.if_ignore_column_differences,
        ) {
            let msg = format!(
                "Skipped {}: expected {} columns, found {}.",
                path_file_src.display(),
                n_cols_reference,
                extent_src.col_max
            );
            tracing::warn!("{msg}");
            builder_report.add_warning(msg);
            builder_report.add_skipped(path_file_src.clone());
            continue;
        }

        let n_rows = append_source_rows(
            &mut template,
            &source,
            row_max_template,
            header_offset,
            options.if_add_file_names,
        );
        builder_report.add_merged(path_file_src.clone(), n_rows as u64);
    }

    template.save_as(&request.file_out)?;

    let report = builder_report.build();
    tracing::info!("{report}");
    Ok(report)
}

fn annotate_rows<T: XlsxSheetTemplate>(
    template: &mut T,
    rows: RangeInclusive<usize>,
    col: usize,
    path_file: &Path,
) {
    let path_text = derive_path_text(path_file);
    for row in rows {
        template.set_cell_value(row, col, EnumCellValue::Text(path_text.clone()));
    }
}

/// Copy source rows `header_offset..row_max` below `row_max_template`.
///
/// The source's own column bound is used, so a wider or narrower source
/// produces a ragged grid when column differences are ignored. The path
/// annotation goes to the source's `col_max + 1`.
fn append_source_rows<T, S>(
    template: &mut T,
    source: &S,
    row_max_template: usize,
    header_offset: usize,
    if_add_file_names: bool,
) -> usize
where
    T: XlsxSheetTemplate,
    S: XlsxSheetSource,
{
    let extent_src = source.extent();
    let path_text = derive_path_text(source.path());

    for row_idx in header_offset..extent_src.row_max {
        let row_dst = calculate_target_row(row_max_template, row_idx, header_offset);
        for col_idx in 0..extent_src.col_max {
            template.set_cell_value(
                row_dst,
                col_idx + 1,
                source.cell_value(row_idx + 1, col_idx + 1),
            );
        }
        if if_add_file_names {
            template.set_cell_value(
                row_dst,
                extent_src.col_max + 1,
                EnumCellValue::Text(path_text.clone()),
            );
        }
    }
    calculate_rows_copied(extent_src.row_max, header_offset)
}
