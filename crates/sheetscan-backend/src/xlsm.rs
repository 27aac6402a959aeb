//! Modern macro-enabled workbook scanner (`.xlsm`, OOXML) using calamine.

use crate::cellref::cell_name;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use sheetscan_core::{Finding, Keyword, Result, ResultSink, ScanError};
use std::path::Path;

/// Scan a modern workbook's cells for the keyword.
///
/// Worksheets are visited in file order, cells in row-major order over the
/// sheet's used area. A cell is a candidate when it carries a formula (the
/// formula text, `=`-prefixed, is what gets matched and logged) or when its
/// value is a plain string literal. The reader does not distinguish a
/// string literal from formula text at this layer, so both are searched;
/// the legacy variant deliberately stays formula-only (see `DESIGN.md`).
///
/// Same early-exit contract as the legacy scanner: the first match copies
/// the workbook, appends one finding, and stops the scan for this file.
///
/// # Errors
/// Returns an error if the workbook cannot be opened or a sheet cannot be
/// read; the pipeline boundary treats that as "no match" for this file.
pub fn scan_cells(path: &Path, keyword: &Keyword, sink: &ResultSink) -> Result<bool> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| ScanError::Workbook(format!("{}: {e}", path.display())))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    for sheet in workbook.sheet_names() {
        let values = workbook
            .worksheet_range(&sheet)
            .map_err(|e| ScanError::Workbook(format!("{}: {e}", path.display())))?;
        // Sheets without formulas simply yield an empty range.
        let formulas = workbook
            .worksheet_formula(&sheet)
            .unwrap_or_else(|_| Range::new((0, 0), (0, 0)));

        if let Some(finding) = first_match(&file_name, &sheet, &values, &formulas, keyword) {
            sink.copy_match(path)?;
            sink.record(&finding)?;
            return Ok(true);
        }
    }

    Ok(false)
}

/// Find the first candidate cell containing the keyword, in row-major order
/// over the union of the value and formula areas.
fn first_match(
    file: &str,
    sheet: &str,
    values: &Range<Data>,
    formulas: &Range<String>,
    keyword: &Keyword,
) -> Option<Finding> {
    let ((min_row, min_col), (max_row, max_col)) = union_bounds(values, formulas)?;

    for row in min_row..=max_row {
        for col in min_col..=max_col {
            let Some(text) = candidate_text(values, formulas, row, col) else {
                continue;
            };
            if keyword.matches(&text) {
                return Some(Finding {
                    file: file.to_string(),
                    sheet: sheet.to_string(),
                    cell: cell_name(row, col),
                    text,
                });
            }
        }
    }

    None
}

/// Candidate text for one cell: the formula (restored `=` prefix) when one
/// is present, otherwise a string-literal value. `None` for everything else
/// (numbers, booleans, dates, empties).
fn candidate_text(
    values: &Range<Data>,
    formulas: &Range<String>,
    row: u32,
    col: u32,
) -> Option<String> {
    if let Some(formula) = formulas.get_value((row, col)) {
        if !formula.is_empty() {
            return Some(format!("={formula}"));
        }
    }
    if let Some(Data::String(s)) = values.get_value((row, col)) {
        return Some(s.clone());
    }
    None
}

/// Bounding box covering both the value range and the formula range.
fn union_bounds(
    values: &Range<Data>,
    formulas: &Range<String>,
) -> Option<((u32, u32), (u32, u32))> {
    let spans = [
        values.start().zip(values.end()),
        formulas.start().zip(formulas.end()),
    ];

    let mut bounds: Option<((u32, u32), (u32, u32))> = None;
    for (start, end) in spans.into_iter().flatten() {
        bounds = Some(match bounds {
            None => (start, end),
            Some((bs, be)) => (
                (bs.0.min(start.0), bs.1.min(start.1)),
                (be.0.max(end.0), be.1.max(end.1)),
            ),
        });
    }
    bounds
}
