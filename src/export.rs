//! Spreadsheet region -> table in a new Word document.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;
use calamine::{Reader, open_workbook_auto};
use clap::Parser;
use tracing::debug;

use crate::docx::{DocumentBuilder, DocumentStyle};
use crate::error::{TransferError, TransferResult};
use crate::range::CellRange;
use crate::value::cell_text;

/// Copy a cell range of a spreadsheet into a table of a new Word document.
#[derive(Parser, Debug)]
#[command(name = "excel2word", version, about = "Copy a spreadsheet range into a Word table")]
pub struct ExportArgs {
    /// Source spreadsheet (xlsx, xlsm, xlsb, xls, ods)
    #[arg(long)]
    pub excel: PathBuf,

    /// Sheet name (default: active sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// First row to copy (1-based)
    #[arg(long, allow_negative_numbers = true)]
    pub row_start: i64,

    /// Last row to copy (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub row_end: i64,

    /// First column, as letters (C) or a number (3)
    #[arg(long, allow_hyphen_values = true)]
    pub col_start: String,

    /// Last column, as letters (H) or a number (8)
    #[arg(long, allow_hyphen_values = true)]
    pub col_end: String,

    /// Output Word document
    #[arg(long, default_value = "output.docx")]
    pub word_out: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub source: PathBuf,
    pub sheet: Option<String>,
    pub range: CellRange,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub cols: usize,
    pub output: PathBuf,
}

/// Tab that was active when the workbook was saved. Only xlsx packages are
/// asked; for other formats the caller falls back to the first sheet.
fn active_sheet_name(path: &Path) -> Option<String> {
    let book = umya_spreadsheet::reader::xlsx::lazy_read(path).ok()?;
    Some(book.get_active_sheet().get_name().to_string())
}

/// Reads `range` from the source workbook as text, row by row.
pub fn read_region(path: &Path, sheet: Option<&str>, range: &CellRange) -> TransferResult<Vec<Vec<String>>> {
    if !path.exists() {
        return Err(TransferError::FileNotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| TransferError::read(path, e))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| TransferError::SheetNotFound(name.to_string()))?,
        None => active_sheet_name(path)
            .filter(|active| sheet_names.contains(active))
            .or_else(|| sheet_names.first().cloned())
            .ok_or_else(|| TransferError::read(path, "workbook has no sheets"))?,
    };
    debug!(sheet = %sheet_name, %range, "reading region");

    let cells = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| TransferError::read(path, format!("sheet {sheet_name}: {e}")))?;

    // get_value takes absolute 0-based positions, so the used area's offset
    // does not matter here.
    let grid = range
        .rows()
        .map(|row| {
            range
                .cols()
                .map(|col| cell_text(cells.get_value((row - 1, col - 1))))
                .collect()
        })
        .collect();
    Ok(grid)
}

/// Writes `grid` as the single table of a new document at `output`.
pub fn write_document(grid: Vec<Vec<String>>, style: DocumentStyle, output: &Path) -> TransferResult<()> {
    let builder = DocumentBuilder::new(style).table(grid);
    debug!(
        rows = builder.row_count(),
        cols = builder.col_count(),
        output = %output.display(),
        "writing document"
    );
    builder
        .save(output)
        .map_err(|e| TransferError::write(output, e))
}

pub fn export(request: &ExportRequest) -> TransferResult<ExportSummary> {
    let grid = read_region(&request.source, request.sheet.as_deref(), &request.range)?;
    write_document(grid, DocumentStyle::default(), &request.output)?;
    Ok(ExportSummary {
        rows: request.range.row_count(),
        cols: request.range.col_count(),
        output: request.output.clone(),
    })
}

pub fn run(args: impl IntoIterator<Item = OsString>) -> Result<()> {
    let args = ExportArgs::parse_from(args);

    if !args.excel.exists() {
        return Err(TransferError::FileNotFound(args.excel).into());
    }
    let range = CellRange::parse(args.row_start, args.row_end, &args.col_start, &args.col_end)?;

    println!(
        "Reading region: rows {}..{}, columns {}..{} (size {}x{})",
        range.row_start,
        range.row_end,
        range.col_start,
        range.col_end,
        range.row_count(),
        range.col_count()
    );

    let request = ExportRequest {
        source: args.excel,
        sheet: args.sheet,
        range,
        output: args.word_out,
    };
    let summary = export(&request)?;

    let shown = std::fs::canonicalize(&summary.output).unwrap_or(summary.output);
    println!("Wrote {}x{} table to Word document: {}", summary.rows, summary.cols, shown.display());
    Ok(())
}
