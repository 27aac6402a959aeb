//! Concurrent per-file scan pipeline.

use crate::{vba, xls, xlsm};
use log::warn;
use rayon::prelude::*;
use sheetscan_core::{Keyword, MacroArchive, ResultSink, WorkItem, WorkbookFormat};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files whose pipeline completed (always the full work list).
    pub scanned: usize,
    /// Files where the macro or formula stage matched.
    pub matched: usize,
    /// Stage failures that were caught and treated as "no match".
    pub errors: usize,
}

/// Worker count: available processor parallelism with a floor of four, so
/// runs over a handful of files still overlap their blocking I/O.
#[must_use]
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map_or(4, NonZeroUsize::get)
        .max(4)
}

/// Fan the per-file pipeline out over `items` on a bounded worker pool.
///
/// Each task runs macro extraction, then the format-appropriate formula
/// scanner. A stage failure is logged, counted, and treated as "no match"
/// for that stage only; the other stage still runs, and no failure ever
/// propagates out of a task. Results land in `sink`/`archive` as side
/// effects; ordering across files is unspecified.
///
/// `on_done` is invoked once per completed file with the monotonically
/// increasing completed count and the total.
pub fn run_scan(
    items: &[WorkItem],
    keyword: &Keyword,
    archive: &MacroArchive,
    sink: &ResultSink,
    workers: usize,
    on_done: impl Fn(usize, usize) + Sync,
) -> ScanSummary {
    // First builder wins; later calls are no-ops. The thread count is
    // resource policy, not correctness.
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build_global()
        .ok();

    let total = items.len();
    let completed = AtomicUsize::new(0);
    let matched = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);

    items.par_iter().for_each(|item| {
        if process_workbook(item, keyword, archive, sink, &errors) {
            matched.fetch_add(1, Ordering::Relaxed);
        }
        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        on_done(done, total);
    });

    ScanSummary {
        scanned: completed.into_inner(),
        matched: matched.into_inner(),
        errors: errors.into_inner(),
    }
}

/// Per-file pipeline: macro stage, then formula stage; the result is the
/// OR of the two. Workbook structures parsed by a stage are dropped when
/// the stage returns, which is what bounds memory across a long run of
/// large files.
fn process_workbook(
    item: &WorkItem,
    keyword: &Keyword,
    archive: &MacroArchive,
    sink: &ResultSink,
    errors: &AtomicUsize,
) -> bool {
    let macro_hit = match vba::extract_macros(&item.path, item.format, keyword, archive, sink) {
        Ok(hit) => hit,
        Err(e) => {
            warn!("macro extraction failed for {}: {e}", item.path.display());
            errors.fetch_add(1, Ordering::Relaxed);
            false
        }
    };

    let formula_result = match item.format {
        WorkbookFormat::LegacyBinary => xls::scan_formulas(&item.path, keyword, sink),
        WorkbookFormat::MacroEnabled => xlsm::scan_cells(&item.path, keyword, sink),
    };
    let formula_hit = match formula_result {
        Ok(hit) => hit,
        Err(e) => {
            warn!("formula scan failed for {}: {e}", item.path.display());
            errors.fetch_add(1, Ordering::Relaxed);
            false
        }
    };

    macro_hit || formula_hit
}
