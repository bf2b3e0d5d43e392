use std::path::PathBuf;

use thiserror::Error;

pub type TransferResult<T> = Result<T, TransferError>;

/// Everything that can stop an export or import run.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid column '{0}': expected a number >= 1 or column letters such as C or AA")]
    InvalidColumn(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("document has {count} table(s), but table index {index} was requested")]
    TableIndexOutOfRange { index: i64, count: usize },

    #[error("failed to read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

impl TransferError {
    pub fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
