//! Shared result sink: the target folder and the findings log.

use crate::error::{Result, ScanError};
use crate::finding::Finding;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Name of the findings log inside the target folder.
pub const FINDINGS_LOG: &str = "formules_trouvees.txt";

/// Shared output state for one run: the keyword-named target folder plus
/// the findings log.
///
/// The target folder is per-run state. [`ResultSink::prepare`] removes and
/// recreates it exactly once, so consecutive runs over the same inputs
/// produce an identical content set. Matching workbooks are copied in at
/// most once each.
///
/// The findings log is appended to by concurrently running per-file
/// pipelines; appends go through a mutex so blocks from different workers
/// can never interleave.
#[derive(Debug)]
pub struct ResultSink {
    target: PathBuf,
    log: Mutex<File>,
}

impl ResultSink {
    /// Reset and recreate `<output>/<keyword>/`, then open the findings log
    /// in append mode.
    ///
    /// # Errors
    /// Returns an error if the target folder cannot be reset or created,
    /// the one failure that is fatal to a run.
    pub fn prepare(output: &Path, keyword: &str) -> Result<Self> {
        let target = output.join(keyword);
        match fs::remove_dir_all(&target) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&target)?;

        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(target.join(FINDINGS_LOG))?;

        Ok(Self {
            target,
            log: Mutex::new(log),
        })
    }

    /// The run's target folder.
    #[must_use]
    pub fn target_dir(&self) -> &Path {
        &self.target
    }

    /// Copy `source` into the target folder under its base name.
    ///
    /// A no-op if a file of that name is already present: the first match
    /// (macro or formula) wins, and the later stage of the same pipeline
    /// does not copy twice.
    ///
    /// # Errors
    /// Returns an error if `source` has no file name or the copy fails.
    pub fn copy_match(&self, source: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| ScanError::MissingInput(source.display().to_string()))?;
        let dest = self.target.join(name);
        if !dest.exists() {
            fs::copy(source, &dest)?;
        }
        Ok(dest)
    }

    /// Append one finding block to the shared log.
    ///
    /// The write and flush happen under the sink's mutex; this is the only
    /// serialization point shared by concurrent workers.
    ///
    /// # Errors
    /// Returns an error if the append fails.
    pub fn record(&self, finding: &Finding) -> Result<()> {
        let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        log.write_all(finding.to_string().as_bytes())?;
        log.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn sample_finding(file: &str) -> Finding {
        Finding {
            file: file.to_string(),
            sheet: "Data".to_string(),
            cell: "B2".to_string(),
            text: "=SUM(A1:A5)".to_string(),
        }
    }

    #[test]
    fn test_prepare_creates_target_and_log() {
        let dir = TempDir::new().unwrap();
        let sink = ResultSink::prepare(dir.path(), "sum").unwrap();

        assert_eq!(sink.target_dir(), dir.path().join("sum"));
        assert!(sink.target_dir().join(FINDINGS_LOG).exists());
    }

    #[test]
    fn test_prepare_resets_previous_run() {
        let dir = TempDir::new().unwrap();

        {
            let sink = ResultSink::prepare(dir.path(), "sum").unwrap();
            sink.record(&sample_finding("stale.xls")).unwrap();
            fs::write(sink.target_dir().join("stale.xls"), b"old").unwrap();
        }

        let sink = ResultSink::prepare(dir.path(), "sum").unwrap();
        assert!(!sink.target_dir().join("stale.xls").exists());
        let log = fs::read_to_string(sink.target_dir().join(FINDINGS_LOG)).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_copy_match_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("budget.xls");
        fs::write(&source, b"first").unwrap();

        let sink = ResultSink::prepare(dir.path(), "sum").unwrap();
        let dest = sink.copy_match(&source).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"first");

        // A second copy of the same name is skipped, not overwritten.
        fs::write(&source, b"second").unwrap();
        sink.copy_match(&source).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"first");
    }

    #[test]
    fn test_record_appends_block() {
        let dir = TempDir::new().unwrap();
        let sink = ResultSink::prepare(dir.path(), "sum").unwrap();

        sink.record(&sample_finding("budget.xls")).unwrap();

        let log = fs::read_to_string(sink.target_dir().join(FINDINGS_LOG)).unwrap();
        assert!(log.contains("Files: budget.xls"));
        assert!(log.contains("Sheet: Data"));
        assert!(log.contains("Cell: B2"));
        assert!(log.contains("Formula: =SUM(A1:A5)"));
    }

    #[test]
    fn test_concurrent_records_do_not_interleave() {
        let dir = TempDir::new().unwrap();
        let sink = Arc::new(ResultSink::prepare(dir.path(), "sum").unwrap());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || {
                    sink.record(&sample_finding(&format!("book{i}.xls"))).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let log = fs::read_to_string(sink.target_dir().join(FINDINGS_LOG)).unwrap();
        let blocks: Vec<&str> = log.split("\n\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 16);
        for block in blocks {
            let lines: Vec<&str> = block.lines().collect();
            assert_eq!(lines.len(), 4, "corrupted block: {block:?}");
            assert!(lines[0].starts_with("Files: book"));
            assert!(lines[3].starts_with("Formula: "));
        }
    }
}
