//! # Sheetscan Core - Shared Scan Types
//!
//! Domain types shared by the scanner backends and the CLI: the normalized
//! search [`Keyword`], extension-based [`WorkbookFormat`] classification,
//! [`Finding`] records, the process-wide [`MacroArchive`], and the per-run
//! [`ResultSink`] that collects matching files and the findings log.
//!
//! ## Quick Start
//!
//! ```rust
//! use sheetscan_core::{Keyword, WorkbookFormat};
//! use std::path::Path;
//!
//! let keyword = Keyword::new("=SUM");
//! assert!(keyword.matches("=sum(A1:A5)"));
//!
//! let format = WorkbookFormat::from_path(Path::new("report.xlsm"));
//! assert_eq!(format, Some(WorkbookFormat::MacroEnabled));
//! ```
//!
//! ## Shared-state model
//!
//! Two output locations have different lifecycles, and the distinction is
//! deliberate:
//!
//! - the **target folder** (`<output>/<keyword>/`) is per-run state, reset
//!   exactly once when the [`ResultSink`] is prepared;
//! - the **macro archive** is process-wide state that accumulates across
//!   runs and is never cleared automatically.

pub mod archive;
pub mod error;
pub mod finding;
pub mod format;
pub mod keyword;
pub mod sink;

pub use archive::MacroArchive;
pub use error::{Result, ScanError};
pub use finding::Finding;
pub use format::{WorkItem, WorkbookFormat};
pub use keyword::Keyword;
pub use sink::{ResultSink, FINDINGS_LOG};
