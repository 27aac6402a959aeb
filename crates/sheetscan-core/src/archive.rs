//! Process-wide macro archive.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Archive directory for extracted macro sources.
///
/// The archive is process-wide state with an explicitly injected location:
/// it is created on demand and never cleared by a run, so module files
/// accumulate across invocations until removed externally. Every module of
/// every scanned workbook is stored here, whether or not it matches the
/// keyword; archival is unconditional.
#[derive(Debug, Clone)]
pub struct MacroArchive {
    dir: PathBuf,
}

impl MacroArchive {
    /// Open the archive at `dir`, creating the directory if absent.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The archive directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Archive file name for a module extracted from `workbook`:
    /// `<workbook-stem>_<module-name>.txt`.
    #[must_use]
    pub fn module_file_name(workbook: &Path, module: &str) -> String {
        let stem = workbook
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{stem}_{module}.txt")
    }

    /// Persist one module's source text, returning the archived path.
    ///
    /// Overwrites an archive entry of the same name from a previous run.
    ///
    /// # Errors
    /// Returns an error if the module file cannot be written.
    pub fn store(&self, workbook: &Path, module: &str, source: &str) -> Result<PathBuf> {
        let path = self.dir.join(Self::module_file_name(workbook, module));
        fs::write(&path, source)?;
        Ok(path)
    }
}
