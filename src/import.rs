//! Table in a Word document -> bordered, wrapped range of a workbook.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use umya_spreadsheet::structs::VerticalAlignmentValues;
use umya_spreadsheet::{Border, Cell, Spreadsheet, Style, Worksheet};

use crate::docx::{TextGrid, read_tables};
use crate::error::{TransferError, TransferResult};
use crate::range::CellRange;
use crate::value::collapse_whitespace;

/// Copy a table of a Word document into a cell range of a workbook.
#[derive(Parser, Debug)]
#[command(name = "word2excel", version, about = "Copy a Word table into a spreadsheet range")]
pub struct ImportArgs {
    /// Source Word document (.docx)
    #[arg(long)]
    pub word_in: PathBuf,

    /// Table index in the document (0 = first table)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub table_index: i64,

    /// Destination workbook (.xlsx), created when missing
    #[arg(long)]
    pub excel_out: PathBuf,

    /// Sheet name (default: active sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// First destination row (1-based)
    #[arg(long, allow_negative_numbers = true)]
    pub row_start: i64,

    /// Last destination row (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub row_end: i64,

    /// First destination column, as letters (C) or a number (3)
    #[arg(long, allow_hyphen_values = true)]
    pub col_start: String,

    /// Last destination column, as letters (H) or a number (8)
    #[arg(long, allow_hyphen_values = true)]
    pub col_end: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub source: PathBuf,
    pub table_index: i64,
    pub output: PathBuf,
    pub sheet: Option<String>,
    pub range: CellRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub table_rows: usize,
    pub table_cols: usize,
    pub rows_written: usize,
    pub cols_written: usize,
    pub range: CellRange,
    pub output: PathBuf,
}

/// Reads table `index` from a .docx file with whitespace collapsed in every cell.
pub fn read_table(path: &Path, index: i64) -> TransferResult<TextGrid> {
    if !path.exists() {
        return Err(TransferError::FileNotFound(path.to_path_buf()));
    }

    let mut tables = read_tables(path).map_err(|e| TransferError::read(path, e))?;
    let count = tables.len();
    let position = usize::try_from(index)
        .ok()
        .filter(|&i| i < count)
        .ok_or(TransferError::TableIndexOutOfRange { index, count })?;

    let table = tables.swap_remove(position);
    Ok(table
        .into_iter()
        .map(|row| row.iter().map(|cell| collapse_whitespace(cell)).collect())
        .collect())
}

/// Column count of an irregular grid: its longest row.
pub fn grid_width(grid: &TextGrid) -> usize {
    grid.iter().map(Vec::len).max().unwrap_or(0)
}

/// Opens `path` for editing, or starts a fresh workbook when it is missing or
/// unreadable.
pub fn open_or_create(path: &Path) -> Spreadsheet {
    if path.exists() {
        match umya_spreadsheet::reader::xlsx::read(path) {
            Ok(book) => return book,
            Err(e) => info!(path = %path.display(), error = %e, "unreadable workbook, starting a new one"),
        }
    }
    umya_spreadsheet::new_file()
}

/// The named sheet when it exists, otherwise the active one.
fn target_sheet<'a>(book: &'a mut Spreadsheet, name: Option<&str>) -> &'a mut Worksheet {
    let position = name.and_then(|name| {
        book.get_sheet_collection()
            .iter()
            .position(|sheet| sheet.get_name() == name)
    });
    match position {
        Some(index) => &mut book.get_sheet_collection_mut()[index],
        None => book.get_active_sheet_mut(),
    }
}

fn apply_borders(style: &mut Style) {
    let borders = style.get_borders_mut();
    thin_black(borders.get_left_mut());
    thin_black(borders.get_right_mut());
    thin_black(borders.get_top_mut());
    thin_black(borders.get_bottom_mut());
}

fn thin_black(side: &mut Border) {
    side.set_border_style(Border::BORDER_THIN);
    // set_argb() maps values equal to a built-in indexed color to indexed="n";
    // lowercase hex keeps it an explicit rgb.
    side.get_color_mut().set_argb("ff000000");
}

fn apply_alignment(style: &mut Style) {
    let alignment = style.get_alignment_mut();
    alignment.set_wrap_text(true);
    alignment.set_vertical(VerticalAlignmentValues::Top);
}

/// Whether the cell already carries a left border; used as the marker for
/// "already formatted".
pub fn has_left_border(cell: &Cell) -> bool {
    cell.get_style()
        .get_borders()
        .is_some_and(|b| b.get_left().get_border_style() != Border::BORDER_NONE)
}

/// Writes the copied block and formats the whole target range.
pub fn write_grid(sheet: &mut Worksheet, grid: &TextGrid, range: &CellRange) -> (usize, usize) {
    let rows_to_write = grid.len().min(range.row_count());
    let cols_to_write = grid_width(grid).min(range.col_count());

    for (i, row) in grid.iter().take(rows_to_write).enumerate() {
        for j in 0..cols_to_write {
            let value = row.get(j).map(String::as_str).unwrap_or("");
            let cell = sheet.get_cell_mut((range.col_start + j as u32, range.row_start + i as u32));
            cell.set_value_string(value);
            let style = cell.get_style_mut();
            apply_alignment(style);
            apply_borders(style);
        }
    }

    for row in range.rows() {
        for col in range.cols() {
            let cell = sheet.get_cell_mut((col, row));
            let bordered = has_left_border(cell);
            let style = cell.get_style_mut();
            if !bordered {
                apply_borders(style);
            }
            apply_alignment(style);
        }
    }

    (rows_to_write, cols_to_write)
}

/// Writes an already-read grid into the destination workbook and saves it.
pub fn write_workbook(grid: &TextGrid, output: &Path, sheet: Option<&str>, range: &CellRange) -> TransferResult<(usize, usize)> {
    let mut book = open_or_create(output);
    let target = target_sheet(&mut book, sheet);
    debug!(sheet = %target.get_name(), %range, "writing range");
    let written = write_grid(target, grid, range);

    umya_spreadsheet::writer::xlsx::write(&book, output)
        .map_err(|e| TransferError::write(output, e))?;
    Ok(written)
}

pub fn import(request: &ImportRequest) -> TransferResult<ImportSummary> {
    let grid = read_table(&request.source, request.table_index)?;
    import_grid(request, &grid)
}

/// Writes an already-read table into the destination workbook and saves it.
pub fn import_grid(request: &ImportRequest, grid: &TextGrid) -> TransferResult<ImportSummary> {
    let table_rows = grid.len();
    let table_cols = grid_width(grid);
    debug!(table_rows, table_cols, index = request.table_index, "read table");

    let (rows_written, cols_written) =
        write_workbook(grid, &request.output, request.sheet.as_deref(), &request.range)?;

    Ok(ImportSummary {
        table_rows,
        table_cols,
        rows_written,
        cols_written,
        range: request.range,
        output: request.output.clone(),
    })
}

pub fn run(args: impl IntoIterator<Item = OsString>) -> Result<()> {
    let args = ImportArgs::parse_from(args);

    if !args.word_in.exists() {
        return Err(TransferError::FileNotFound(args.word_in).into());
    }
    let range = CellRange::parse(args.row_start, args.row_end, &args.col_start, &args.col_end)?;

    let grid = read_table(&args.word_in, args.table_index)?;
    println!("Word table[{}]: {} x {}", args.table_index, grid.len(), grid_width(&grid));
    println!(
        "Writing data to rows {}-{}, columns {}-{}...",
        range.row_start, range.row_end, range.col_start, range.col_end
    );

    let request = ImportRequest {
        source: args.word_in,
        table_index: args.table_index,
        output: args.excel_out,
        sheet: args.sheet,
        range,
    };
    let summary = import_grid(&request, &grid)?;

    let shown = std::fs::canonicalize(&summary.output).unwrap_or(summary.output);
    println!(
        "Wrote table with wrap text and borders to range {} -> {}",
        summary.range,
        shown.display()
    );
    Ok(())
}
