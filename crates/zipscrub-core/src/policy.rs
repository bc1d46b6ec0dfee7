//! What to do with an archive whose rewrite failed.
//!
//! The default, [`DeleteOnFailure`], removes the archive after any per-job
//! failure, transient I/O errors included. [`PreserveOnFailure`] keeps it.

use crate::ScrubError;
use crate::report::Disposition;
use std::path::Path;

/// Decides the fate of an archive after its job failed.
pub trait FailurePolicy: Send + Sync {
    /// Called once per failed job, on the worker that ran it.
    fn on_failure(&self, archive: &Path, error: &ScrubError) -> Disposition;
}

/// Removes the archive from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOnFailure;

impl FailurePolicy for DeleteOnFailure {
    fn on_failure(&self, archive: &Path, _error: &ScrubError) -> Disposition {
        match std::fs::remove_file(archive) {
            Ok(()) => {
                tracing::warn!("deleted {} after failed rewrite", archive.display());
                Disposition::Deleted
            }
            Err(e) => {
                tracing::error!("could not delete {}: {e}", archive.display());
                Disposition::DeleteFailed(e.to_string())
            }
        }
    }
}

/// Leaves the archive untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreserveOnFailure;

impl FailurePolicy for PreserveOnFailure {
    fn on_failure(&self, _archive: &Path, _error: &ScrubError) -> Disposition {
        Disposition::Preserved
    }
}
