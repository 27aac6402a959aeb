//! Error types for scan operations.

use thiserror::Error;

/// Errors that can occur while scanning workbooks.
///
/// Per-file failures are caught at the pipeline stage boundary, logged, and
/// counted; the file is treated as "no match" and the run continues. The
/// only fatal errors are the ones raised while setting up the output
/// directory structure itself.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Referenced input file or directory is absent.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// A workbook reader failed on a malformed or unsupported file.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// VBA project detection or module extraction failed.
    #[error("VBA error: {0}")]
    Vba(String),

    /// The external converter errored or produced no output artifact.
    #[error("conversion error: {0}")]
    Conversion(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for [`Result<T, ScanError>`].
pub type Result<T> = std::result::Result<T, ScanError>;
