//! # Sheetscan Backend - Scanner Implementations
//!
//! Per-format workbook scanners and the concurrent scan pipeline.
//!
//! Every workbook goes through the same two-stage pipeline:
//!
//! 1. **Macro stage** ([`vba`]): every embedded VBA module is extracted
//!    and archived unconditionally; modules containing the keyword are
//!    additionally copied into the result folder.
//! 2. **Formula stage** ([`xls`] for legacy binary workbooks, [`xlsm`] for
//!    modern macro-enabled ones): sheets and cells are walked in file
//!    order and the scan stops at the first matching cell, which copies the
//!    workbook and appends one finding to the shared log.
//!
//! [`discover`] builds the work list (walk, classify, convert legacy files
//! through an external [`SpreadsheetConverter`]); [`pipeline::run_scan`]
//! fans the two-stage pipeline out over a worker pool with per-file error
//! isolation.

pub mod cellref;
pub mod convert;
pub mod discover;
pub mod pipeline;
pub mod vba;
pub mod xls;
pub mod xlsm;

pub use convert::{converted_path, LibreOfficeConverter, SpreadsheetConverter};
pub use discover::discover;
pub use pipeline::{default_workers, run_scan, ScanSummary};
pub use vba::MacroModule;
