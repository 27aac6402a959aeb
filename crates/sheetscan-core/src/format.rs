//! Workbook format classification.

use std::path::{Path, PathBuf};

/// Spreadsheet format tag, assigned once at discovery time.
///
/// Classification is by file extension only (no content sniffing), and the
/// tag selects the scanner variant downstream, so no runtime type
/// inspection happens inside the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkbookFormat {
    /// Legacy binary workbook (`.xls`, BIFF).
    LegacyBinary,
    /// Modern macro-enabled workbook (`.xlsm`, OOXML zip).
    MacroEnabled,
}

impl WorkbookFormat {
    /// Classify a path by extension.
    ///
    /// Returns `None` for anything that is not `.xls` or `.xlsm`;
    /// unsupported files are excluded from the work list.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xls" => Some(Self::LegacyBinary),
            "xlsm" => Some(Self::MacroEnabled),
            _ => None,
        }
    }
}

/// A resolved, scannable workbook path plus its format tag.
///
/// Produced by discovery/conversion, consumed exactly once by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Path to the workbook on disk.
    pub path: PathBuf,
    /// Format tag selected at classification time.
    pub format: WorkbookFormat,
}

impl WorkItem {
    /// Create a work item for an already-classified path.
    pub fn new(path: impl Into<PathBuf>, format: WorkbookFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Base file name, lossily decoded, as used in log records and copies.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
