//! Legacy binary workbook scanner (`.xls`, BIFF) using calamine.
//!
//! Only formula-typed cells are candidates in this variant; plain string
//! literals are ignored. This is narrower than the modern scanner on
//! purpose (see `DESIGN.md`).

use crate::cellref::cell_name;
use calamine::{open_workbook, Reader, Xls};
use sheetscan_core::{Finding, Keyword, Result, ResultSink, ScanError};
use std::path::Path;

/// Scan a legacy workbook's formula cells for the keyword.
///
/// Sheets are visited in file order, cells in row-major order. On the
/// first formula whose text contains the keyword, the workbook is copied
/// into the sink, exactly one finding is appended, and the scan stops;
/// remaining cells and sheets are not visited. Returns whether a match was
/// found.
///
/// # Errors
/// Returns an error if the workbook cannot be opened or a sheet cannot be
/// read; the pipeline boundary treats that as "no match" for this file.
pub fn scan_formulas(path: &Path, keyword: &Keyword, sink: &ResultSink) -> Result<bool> {
    let mut workbook: Xls<_> = open_workbook(path)
        .map_err(|e| ScanError::Workbook(format!("{}: {e}", path.display())))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    for sheet in workbook.sheet_names() {
        let formulas = workbook
            .worksheet_formula(&sheet)
            .map_err(|e| ScanError::Workbook(format!("{}: {e}", path.display())))?;
        let Some((start_row, start_col)) = formulas.start() else {
            continue;
        };

        for (row_idx, row) in formulas.rows().enumerate() {
            for (col_idx, formula) in row.iter().enumerate() {
                if formula.is_empty() {
                    continue;
                }
                // calamine returns formula text without the leading `=`.
                let text = format!("={formula}");
                if keyword.matches(&text) {
                    sink.copy_match(path)?;
                    sink.record(&Finding {
                        file: file_name.clone(),
                        sheet: sheet.clone(),
                        cell: cell_name(start_row + row_idx as u32, start_col + col_idx as u32),
                        text,
                    })?;
                    return Ok(true);
                }
            }
        }
    }

    Ok(false)
}
