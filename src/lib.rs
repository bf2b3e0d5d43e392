//! Copy rectangular blocks of cells between spreadsheets and Word tables.
//!
//! `excel2word` reads a range of a workbook into a new document's table;
//! `word2excel` writes a document table into a bordered, wrapped range.

pub mod docx;
pub mod error;
pub mod export;
pub mod import;
pub mod range;
pub mod value;

pub use error::{TransferError, TransferResult};
pub use range::{CellRange, column_name, parse_column};

/// Sends `tracing` output to stderr, filtered by `RUST_LOG` (default `warn`),
/// so stdout stays reserved for the progress messages.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
