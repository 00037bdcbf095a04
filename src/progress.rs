//! Progress-callback trait for per-file run events.
//!
//! Inject an [`Arc<dyn RunProgressCallback>`] via
//! [`crate::config::SummarizeConfigBuilder::progress_callback`] to receive
//! events as the driver works through the library.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal progress bar, a log file, or a CI annotation
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` so the same implementation also
//! works if a caller drives several independent runs from worker threads.

use std::sync::Arc;

/// Called by the driver as it processes each document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. The driver itself is strictly sequential, so within
/// one run the methods are never called concurrently.
pub trait RunProgressCallback: Send + Sync {
    /// Called once before any document is processed.
    fn on_run_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a document's extraction begins.
    fn on_file_start(&self, stem: &str, index: usize, total_files: usize) {
        let _ = (stem, index, total_files);
    }

    /// Called when a document's record was written.
    ///
    /// `preview` is true when a `<stem>.png` was also produced.
    fn on_file_complete(&self, stem: &str, index: usize, total_files: usize, preview: bool) {
        let _ = (stem, index, total_files, preview);
    }

    /// Called when a document has no catalog entry and is skipped.
    fn on_file_skipped(&self, stem: &str, index: usize, total_files: usize) {
        let _ = (stem, index, total_files);
    }

    /// Called when a document's record could not be written.
    fn on_file_error(&self, stem: &str, index: usize, total_files: usize, error: &str) {
        let _ = (stem, index, total_files, error);
    }

    /// Called once after every document has been attempted.
    fn on_run_complete(&self, records: usize, previews: usize) {
        let _ = (records, previews);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl RunProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::SummarizeConfig`].
pub type ProgressCallback = Arc<dyn RunProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        completes: AtomicUsize,
        skips: AtomicUsize,
        errors: AtomicUsize,
    }

    impl RunProgressCallback for TrackingCallback {
        fn on_file_complete(&self, _stem: &str, _i: usize, _n: usize, _preview: bool) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }
        fn on_file_skipped(&self, _stem: &str, _i: usize, _n: usize) {
            self.skips.fetch_add(1, Ordering::SeqCst);
        }
        fn on_file_error(&self, _stem: &str, _i: usize, _n: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(3);
        cb.on_file_start("FIPS_203", 1, 3);
        cb.on_file_complete("FIPS_203", 1, 3, true);
        cb.on_file_skipped("orphan", 2, 3);
        cb.on_file_error("broken", 3, 3, "write failed");
        cb.on_run_complete(1, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let cb = TrackingCallback {
            completes: AtomicUsize::new(0),
            skips: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        };
        cb.on_file_complete("a", 1, 3, false);
        cb.on_file_skipped("b", 2, 3);
        cb.on_file_error("c", 3, 3, "boom");
        assert_eq!(cb.completes.load(Ordering::SeqCst), 1);
        assert_eq!(cb.skips.load(Ordering::SeqCst), 1);
        assert_eq!(cb.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn RunProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_run_start(10);
        cb.on_file_start("x", 1, 10);
    }
}
