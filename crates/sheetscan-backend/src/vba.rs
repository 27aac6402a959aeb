//! VBA project detection, module extraction, and archival.
//!
//! Extraction is unconditional: every module of every workbook that has a
//! VBA project is written to the macro archive, keyword or not. Matching
//! only decides which archived modules are *additionally* copied into the
//! run's target folder. Macro matches never produce findings in the log.

use calamine::vba::VbaProject;
use calamine::{open_workbook, Reader, Xls, Xlsx};
use log::debug;
use sheetscan_core::{
    Keyword, MacroArchive, Result, ResultSink, ScanError, WorkbookFormat,
};
use std::borrow::Cow;
use std::path::Path;

/// A macro module pulled out of a workbook: module name plus decompressed
/// source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroModule {
    /// Module name as stored in the VBA project.
    pub name: String,
    /// Decompressed module source.
    pub source: String,
}

/// Extract every VBA module from `path`.
///
/// Returns an empty list when the workbook carries no VBA project at all;
/// that case has no side effects anywhere downstream.
///
/// # Errors
/// Returns an error if the workbook cannot be opened or the VBA project is
/// malformed.
pub fn collect_modules(path: &Path, format: WorkbookFormat) -> Result<Vec<MacroModule>> {
    match format {
        WorkbookFormat::LegacyBinary => {
            let mut workbook: Xls<_> = open_workbook(path)
                .map_err(|e| ScanError::Workbook(format!("{}: {e}", path.display())))?;
            read_project(workbook.vba_project())
        }
        WorkbookFormat::MacroEnabled => {
            let mut workbook: Xlsx<_> = open_workbook(path)
                .map_err(|e| ScanError::Workbook(format!("{}: {e}", path.display())))?;
            read_project(workbook.vba_project())
        }
    }
}

fn read_project<E: std::fmt::Display>(
    project: Option<std::result::Result<Cow<'_, VbaProject>, E>>,
) -> Result<Vec<MacroModule>> {
    let Some(project) = project else {
        return Ok(Vec::new());
    };
    let project = project.map_err(|e| ScanError::Vba(e.to_string()))?;

    let mut modules = Vec::new();
    for name in project.get_module_names() {
        let source = project
            .get_module(name.as_ref())
            .map_err(|e| ScanError::Vba(format!("{name}: {e}")))?;
        modules.push(MacroModule {
            name: name.to_string(),
            source,
        });
    }
    Ok(modules)
}

/// Run the macro stage for one workbook: archive every module, copy the
/// matching ones into the sink. Returns whether at least one module
/// matched.
///
/// # Errors
/// Propagates extraction and archival failures to the pipeline boundary,
/// where they are logged and treated as "no match"; modules archived
/// before the failure stay archived.
pub fn extract_macros(
    path: &Path,
    format: WorkbookFormat,
    keyword: &Keyword,
    archive: &MacroArchive,
    sink: &ResultSink,
) -> Result<bool> {
    let modules = collect_modules(path, format)?;
    if modules.is_empty() {
        return Ok(false);
    }
    debug!("{}: {} VBA module(s)", path.display(), modules.len());
    archive_and_match(path, &modules, keyword, archive, sink)
}

/// Archival and matching, split from workbook I/O so the policy can be
/// exercised without a real VBA binary.
///
/// # Errors
/// Returns an error if an archive write or a copy into the sink fails.
pub fn archive_and_match(
    path: &Path,
    modules: &[MacroModule],
    keyword: &Keyword,
    archive: &MacroArchive,
    sink: &ResultSink,
) -> Result<bool> {
    let mut matched = false;
    for module in modules {
        // Archived first, unconditionally; only then is the keyword tested.
        let archived = archive.store(path, &module.name, &module.source)?;
        if keyword.matches(&module.source) {
            sink.copy_match(&archived)?;
            matched = true;
        }
    }
    Ok(matched)
}
