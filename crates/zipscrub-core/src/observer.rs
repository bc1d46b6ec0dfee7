//! Event hooks for scrub runs.

use crate::ScrubError;
use crate::report::JobOutcome;
use std::path::Path;

/// Receives events while a run is in progress.
///
/// Hooks other than `on_archive_found` and `on_traversal_error` are called
/// from worker threads, possibly at the same time, so implementations must
/// be `Sync`. Every hook has an empty default.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use std::sync::atomic::AtomicUsize;
/// use std::sync::atomic::Ordering;
/// use zipscrub_core::ScrubObserver;
///
/// #[derive(Default)]
/// struct ExclusionCounter(AtomicUsize);
///
/// impl ScrubObserver for ExclusionCounter {
///     fn on_entry_excluded(&self, _archive: &Path, _name: &str) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait ScrubObserver: Sync {
    /// Called on the traversal thread when an archive is discovered.
    fn on_archive_found(&self, _path: &Path) {}

    /// Called on a worker just before the archive is rewritten.
    fn on_job_start(&self, _path: &Path) {}

    /// Called on a worker for each excluded entry as the rewrite reaches it,
    /// including in archives whose job later fails.
    fn on_entry_excluded(&self, _archive: &Path, _name: &str) {}

    /// Called on a worker when the job has finished.
    fn on_job_complete(&self, _path: &Path, _outcome: &JobOutcome) {}

    /// Called on the traversal thread when part of the tree cannot be read.
    fn on_traversal_error(&self, _error: &ScrubError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScrubObserver for NoopObserver {}
