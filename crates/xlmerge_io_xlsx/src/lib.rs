//! `xlmerge_io_xlsx` v1:
//! Rust-side XLSX row-merge kernel.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : cell model, options, request and errors
//! - `report` : merge report model and builder
//! - `util`   : pure helper functions
//! - `reader` : calamine-backed first-sheet reader
//! - `writer` : in-memory template grid and rust_xlsxwriter serializer
//! - `merge`  : merge orchestration
pub mod conf;
pub mod merge;
pub mod reader;
pub mod report;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{C_EXT_XLSX, N_FILES_IN_MIN, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
pub use merge::{BackendXlsx, XlsxMergeBackend, merge_xlsx_files, merge_xlsx_files_with};
pub use reader::{XlsxSheetReader, XlsxSheetSource};
pub use report::{ReportMerge, ReportMergeBuilder};
pub use spec::{
    EnumCellValue, MergeXlsxError, SpecSheetExtent, SpecXlsxMergeOptions, SpecXlsxMergeRequest,
};
pub use writer::{XlsxSheetTemplate, XlsxTemplateWriter};
