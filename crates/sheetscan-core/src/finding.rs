//! Formula match records.

use std::fmt;

/// A single recorded formula/text match: file, sheet, cell, matched text.
///
/// At most one finding is ever recorded per workbook: scanners stop at the
/// first matching cell in sheet/row/column order. Macro matches never
/// produce findings; they only copy module files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Base name of the workbook the match was found in.
    pub file: String,
    /// Sheet name or title.
    pub sheet: String,
    /// A1-style cell address.
    pub cell: String,
    /// The matched formula or cell text, verbatim.
    pub text: String,
}

impl fmt::Display for Finding {
    /// Renders the block appended to the findings log: four labelled lines
    /// followed by a blank separator line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Files: {}", self.file)?;
        writeln!(f, "Sheet: {}", self.sheet)?;
        writeln!(f, "Cell: {}", self.cell)?;
        writeln!(f, "Formula: {}", self.text)?;
        writeln!(f)
    }
}
