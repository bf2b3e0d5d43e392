//! Column tokens and inclusive cell ranges.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{TransferError, TransferResult};

/// Last column a worksheet can address (XFD).
pub const MAX_COLUMN: u32 = 16_384;
/// Last row a worksheet can address.
pub const MAX_ROW: u32 = 1_048_576;

static COLUMN_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,3}$").expect("valid regex"));

/// Turns `"C"`, `"aa"` or `"3"` into a 1-based column index.
pub fn parse_column(token: &str) -> TransferResult<u32> {
    let token = token.trim();

    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        // Too large for u32 is as out of bounds as anything past XFD.
        let value = token.parse::<u32>().unwrap_or(u32::MAX);
        if value < 1 || value > MAX_COLUMN {
            return Err(TransferError::InvalidRange(format!(
                "column index must be between 1 and {MAX_COLUMN}, got {token}"
            )));
        }
        return Ok(value);
    }

    if !COLUMN_LETTERS.is_match(token) {
        return Err(TransferError::InvalidColumn(token.to_string()));
    }

    let index = token
        .bytes()
        .map(|b| u32::from(b.to_ascii_uppercase() - b'A' + 1))
        .fold(0u32, |acc, digit| acc * 26 + digit);

    if index > MAX_COLUMN {
        return Err(TransferError::InvalidColumn(token.to_string()));
    }
    Ok(index)
}

pub fn column_name(mut column: u32) -> String {
    // 1 -> A, 26 -> Z, 27 -> AA ...
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

/// An inclusive, 1-based block of rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub row_start: u32,
    pub row_end: u32,
    pub col_start: u32,
    pub col_end: u32,
}

impl CellRange {
    /// Rows arrive signed straight from the command line; columns are
    /// already normalized by [`parse_column`].
    pub fn new(row_start: i64, row_end: i64, col_start: u32, col_end: u32) -> TransferResult<Self> {
        if row_start < 1 || row_end < 1 {
            return Err(TransferError::InvalidRange(format!(
                "rows must be >= 1, got {row_start}..{row_end}"
            )));
        }
        if col_start < 1 || col_end < 1 {
            return Err(TransferError::InvalidRange(format!(
                "columns must be >= 1, got {col_start}..{col_end}"
            )));
        }
        if row_start > row_end || col_start > col_end {
            return Err(TransferError::InvalidRange(format!(
                "need row-start <= row-end and col-start <= col-end, got rows {row_start}..{row_end}, columns {col_start}..{col_end}"
            )));
        }
        if row_end > i64::from(MAX_ROW) {
            return Err(TransferError::InvalidRange(format!(
                "row {row_end} is past the last worksheet row {MAX_ROW}"
            )));
        }

        Ok(Self {
            row_start: row_start as u32,
            row_end: row_end as u32,
            col_start,
            col_end,
        })
    }

    /// Parses both column tokens and validates the whole range.
    pub fn parse(row_start: i64, row_end: i64, col_start: &str, col_end: &str) -> TransferResult<Self> {
        let c1 = parse_column(col_start)?;
        let c2 = parse_column(col_end)?;
        Self::new(row_start, row_end, c1, c2)
    }

    pub fn row_count(&self) -> usize {
        (self.row_end - self.row_start + 1) as usize
    }

    pub fn col_count(&self) -> usize {
        (self.col_end - self.col_start + 1) as usize
    }

    pub fn rows(&self) -> RangeInclusive<u32> {
        self.row_start..=self.row_end
    }

    pub fn cols(&self) -> RangeInclusive<u32> {
        self.col_start..=self.col_end
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_name(self.col_start),
            self.row_start,
            column_name(self.col_end),
            self.row_end
        )
    }
}
