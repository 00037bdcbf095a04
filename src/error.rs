//! Error types for the pqlib2md library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`SummarizeError`] — **Fatal**: the run cannot proceed at all (catalog
//!   CSV missing, library directory missing, invalid configuration).
//!   Returned as `Err(SummarizeError)` from [`crate::summarize::run`] before
//!   any document is processed.
//!
//! * [`FileError`] — **Non-fatal**: one document failed (extraction tool
//!   errored, preview rasterisation failed, output write failed) but every
//!   other document is unaffected. Collected into
//!   [`crate::output::RunSummary::errors`] so callers can inspect partial
//!   success rather than losing the whole run to one bad file.
//!
//! The separation mirrors the run contract: the process exits 1 only when a
//! precondition fails; per-file trouble degrades gracefully and is surfaced
//! solely through the final summary.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pqlib2md library.
///
/// Per-document failures use [`FileError`] and are stored in
/// [`crate::output::RunSummary`] rather than propagated here.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The catalog CSV was not found at the given path.
    #[error("Catalog CSV not found: '{path}'\nCheck the path exists and is readable.")]
    CatalogNotFound { path: PathBuf },

    /// The catalog CSV exists but could not be parsed at all.
    #[error("Failed to read catalog '{path}': {detail}")]
    CatalogUnreadable { path: PathBuf, detail: String },

    /// The document directory was not found.
    #[error("Library directory not found: '{path}'")]
    LibraryDirNotFound { path: PathBuf },

    /// The document directory exists but could not be listed.
    #[error("Failed to list library directory '{path}': {source}")]
    LibraryDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single document.
///
/// Stored in [`crate::output::RunSummary::errors`]. The run continues past
/// every one of these; only the variants below exist because everything else
/// degrades to empty text inside the pipeline itself.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// Text extraction failed; the record was still written with empty text.
    #[error("{stem}: text extraction failed: {reason}")]
    ExtractionFailed { stem: String, reason: String },

    /// Preview rasterisation failed; the record omits the preview reference.
    #[error("{stem}: preview generation failed: {reason}")]
    PreviewFailed { stem: String, reason: String },

    /// The rendered record could not be written to disk.
    #[error("{stem}.md: write failed: {reason}")]
    WriteFailed { stem: String, reason: String },
}

impl FileError {
    /// Stem of the document this error belongs to.
    pub fn stem(&self) -> &str {
        match self {
            FileError::ExtractionFailed { stem, .. }
            | FileError::PreviewFailed { stem, .. }
            | FileError::WriteFailed { stem, .. } => stem,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_not_found_display() {
        let e = SummarizeError::CatalogNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert!(e.to_string().contains("/tmp/missing.csv"));
    }

    #[test]
    fn write_failed_display_names_the_output_file() {
        let e = FileError::WriteFailed {
            stem: "FIPS_203".into(),
            reason: "permission denied".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("FIPS_203.md"), "got: {msg}");
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn file_error_stem_accessor() {
        let e = FileError::PreviewFailed {
            stem: "BSI_TR".into(),
            reason: "pdftoppm exited 1".into(),
        };
        assert_eq!(e.stem(), "BSI_TR");
    }
}
