//! Run results: the summary a completed run hands back.
//!
//! [`RunSummary`] is the sole surfaced report of recoverable errors — the
//! driver never aborts on a per-file failure, it records it here and moves
//! on. Serialisable so the CLI's `--json` mode can emit it directly.

use crate::error::FileError;
use serde::{Deserialize, Serialize};

/// What happened to one enumerated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileOutcome {
    /// Record written (and, for PDFs, whether a preview was produced).
    Written { preview: bool },
    /// No catalog entry matched the document's stem.
    SkippedNoCatalogEntry,
    /// The record could not be written.
    Failed,
}

/// Aggregate counters and error list for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files enumerated in the library directory (PDFs + HTMLs).
    pub total_files: usize,
    /// Records written.
    pub records_written: usize,
    /// PNG previews produced (PDFs only).
    pub previews_written: usize,
    /// Documents skipped for lack of a catalog entry.
    pub skipped: usize,
    /// Every recoverable error, in processing order.
    pub errors: Vec<FileError>,
}

impl RunSummary {
    /// True when every enumerated document produced a record.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.skipped == 0
    }
}
