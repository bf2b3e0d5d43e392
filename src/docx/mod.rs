//! Minimal WordprocessingML (.docx) support: one writer that emits a document
//! holding a heading and a single table, and one reader that pulls every
//! top-level body table out as text.

mod reader;
mod writer;

pub use reader::{TextGrid, read_tables};
pub use writer::{DocumentBuilder, DocumentStyle};

use thiserror::Error;

pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub(crate) const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// Result type for docx operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;

/// Errors that can occur during docx reading/writing
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),
}
