//! External format conversion for legacy workbooks.
//!
//! Legacy `.xls` files additionally get a macro-enabled OOXML copy so the
//! modern scanner sees them too. The conversion runs through an external
//! headless office process behind the [`SpreadsheetConverter`] trait, which
//! is what lets tests substitute a fake instead of spawning LibreOffice.

use log::debug;
use sheetscan_core::{Result, ScanError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Converts a legacy workbook into a macro-enabled copy inside an output
/// directory.
pub trait SpreadsheetConverter: Send + Sync {
    /// Convert `input`, placing `<stem>.xlsm` in `out_dir` and returning
    /// the new path.
    ///
    /// # Errors
    /// Returns an error when the input is missing, the converter process
    /// fails, or the expected output artifact does not appear. The caller
    /// drops the converted copy from the work list and continues; nothing
    /// here is fatal to a run.
    fn convert_to_macro_enabled(&self, input: &Path, out_dir: &Path) -> Result<PathBuf>;
}

/// Deterministic output path for a conversion: the input's base name with
/// the macro-enabled extension, inside `out_dir`.
#[must_use]
pub fn converted_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_dir.join(format!("{stem}.xlsm"))
}

/// Headless LibreOffice conversion (`--headless --convert-to xlsm`).
pub struct LibreOfficeConverter {
    program: String,
}

impl LibreOfficeConverter {
    /// Use `program` as the converter executable (normally `libreoffice`,
    /// overridable for packaged `soffice` installs and for tests).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for LibreOfficeConverter {
    fn default() -> Self {
        Self::new("libreoffice")
    }
}

impl SpreadsheetConverter for LibreOfficeConverter {
    fn convert_to_macro_enabled(&self, input: &Path, out_dir: &Path) -> Result<PathBuf> {
        if !input.exists() {
            return Err(ScanError::MissingInput(input.display().to_string()));
        }

        let output = Command::new(&self.program)
            .arg("--headless")
            .args(["--convert-to", "xlsm"])
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .output()
            .map_err(|e| {
                ScanError::Conversion(format!("failed to execute {}: {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::Conversion(format!(
                "{} failed on {}: {}",
                self.program,
                input.display(),
                stderr.trim()
            )));
        }

        // The exit status alone is not trusted; the artifact has to be
        // there.
        let expected = converted_path(input, out_dir);
        if !expected.exists() {
            return Err(ScanError::Conversion(format!(
                "no output artifact at {}",
                expected.display()
            )));
        }

        debug!("converted {} -> {}", input.display(), expected.display());
        Ok(expected)
    }
}
