//! Work-list discovery: walk, classify, convert.

use crate::convert::SpreadsheetConverter;
use log::warn;
use sheetscan_core::{Result, ScanError, WorkItem, WorkbookFormat};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walk `source` recursively and build the scan work list.
///
/// Supported workbooks are classified by extension; everything else is
/// skipped silently. After the walk, every legacy workbook is offered to
/// `converter`; each successful conversion contributes an *additional*
/// macro-enabled work item, with the converted copy landing in the source
/// directory root. A conversion failure is logged and drops only that
/// converted copy, never the original legacy item and never the run.
///
/// # Errors
/// Returns an error only when `source` is not a directory.
pub fn discover(source: &Path, converter: &dyn SpreadsheetConverter) -> Result<Vec<WorkItem>> {
    if !source.is_dir() {
        return Err(ScanError::MissingInput(source.display().to_string()));
    }

    let mut items: Vec<WorkItem> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(format) = WorkbookFormat::from_path(entry.path()) {
            if seen.insert(entry.path().to_path_buf()) {
                items.push(WorkItem::new(entry.path(), format));
            }
        }
    }

    // Conversion runs after the walk so converted copies are never
    // double-discovered mid-traversal. A copy that already exists from an
    // earlier run was picked up by the walk above; the dedup keeps it from
    // entering the list twice.
    let legacy: Vec<PathBuf> = items
        .iter()
        .filter(|item| item.format == WorkbookFormat::LegacyBinary)
        .map(|item| item.path.clone())
        .collect();

    for path in legacy {
        match converter.convert_to_macro_enabled(&path, source) {
            Ok(converted) => {
                if seen.insert(converted.clone()) {
                    items.push(WorkItem::new(converted, WorkbookFormat::MacroEnabled));
                }
            }
            Err(e) => warn!("conversion failed for {}: {e}", path.display()),
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::converted_path;
    use std::fs;
    use tempfile::TempDir;

    /// Fake converter that just writes a stub artifact at the expected
    /// path, or refuses, without spawning any process.
    struct FakeConverter {
        succeed: bool,
    }

    impl SpreadsheetConverter for FakeConverter {
        fn convert_to_macro_enabled(
            &self,
            input: &Path,
            out_dir: &Path,
        ) -> Result<PathBuf> {
            if !self.succeed {
                return Err(ScanError::Conversion("fake refusal".to_string()));
            }
            let out = converted_path(input, out_dir);
            fs::write(&out, b"converted stub")?;
            Ok(out)
        }
    }

    fn seed_tree(dir: &Path) {
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("a.xlsm"), b"modern").unwrap();
        fs::write(dir.join("sub/b.xls"), b"legacy").unwrap();
        fs::write(dir.join("notes.txt"), b"ignored").unwrap();
        fs::write(dir.join("plain.xlsx"), b"ignored too").unwrap();
    }

    #[test]
    fn test_discover_classifies_and_converts() {
        let dir = TempDir::new().unwrap();
        seed_tree(dir.path());

        let items = discover(dir.path(), &FakeConverter { succeed: true }).unwrap();

        // a.xlsm, sub/b.xls, plus the converted b.xlsm in the source root.
        assert_eq!(items.len(), 3);
        assert!(items
            .iter()
            .any(|i| i.file_name() == "a.xlsm" && i.format == WorkbookFormat::MacroEnabled));
        assert!(items
            .iter()
            .any(|i| i.file_name() == "b.xls" && i.format == WorkbookFormat::LegacyBinary));
        assert!(items
            .iter()
            .any(|i| i.path == dir.path().join("b.xlsm")
                && i.format == WorkbookFormat::MacroEnabled));
    }

    #[test]
    fn test_conversion_failure_keeps_original_item() {
        let dir = TempDir::new().unwrap();
        seed_tree(dir.path());

        let items = discover(dir.path(), &FakeConverter { succeed: false }).unwrap();

        assert_eq!(items.len(), 2);
        assert!(items.iter().any(|i| i.file_name() == "b.xls"));
    }

    #[test]
    fn test_second_discovery_does_not_duplicate_converted_copy() {
        let dir = TempDir::new().unwrap();
        seed_tree(dir.path());

        let converter = FakeConverter { succeed: true };
        discover(dir.path(), &converter).unwrap();
        // The converted b.xlsm now sits in the source root and is found by
        // the walk of the second run.
        let items = discover(dir.path(), &converter).unwrap();

        let converted_count = items
            .iter()
            .filter(|i| i.path == dir.path().join("b.xlsm"))
            .count();
        assert_eq!(converted_count, 1);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_missing_source_directory() {
        let result = discover(
            Path::new("/nonexistent/excel"),
            &FakeConverter { succeed: true },
        );
        assert!(matches!(result, Err(ScanError::MissingInput(_))));
    }
}
