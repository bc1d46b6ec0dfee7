//! Rewrite and run reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a single archive rewrite.
///
/// # Examples
///
/// ```
/// use zipscrub_core::RewriteReport;
///
/// let mut report = RewriteReport::default();
/// report.entries_copied = 3;
/// report.placeholders_written = 2;
/// report.excluded.push("LICENSE".to_string());
///
/// assert_eq!(report.entries_retained(), 5);
/// assert_eq!(report.entries_total(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Names of excluded entries, in source order.
    pub excluded: Vec<String>,

    /// Number of PNG entries whose content became the placeholder.
    pub placeholders_written: usize,

    /// Number of file entries copied unchanged.
    pub entries_copied: usize,

    /// Number of directory entries carried over.
    pub directories_copied: usize,

    /// Size of the archive before rewriting.
    pub bytes_before: u64,

    /// Size of the archive after rewriting.
    pub bytes_after: u64,

    /// Duration of the rewrite.
    pub duration: Duration,
}

impl RewriteReport {
    /// Returns the number of entries present in the rewritten archive.
    #[must_use]
    pub fn entries_retained(&self) -> usize {
        self.placeholders_written + self.entries_copied + self.directories_copied
    }

    /// Returns the number of entries in the source archive.
    #[must_use]
    pub fn entries_total(&self) -> usize {
        self.entries_retained() + self.excluded.len()
    }
}

/// What happened to an archive after its job failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The archive was removed from disk.
    Deleted,
    /// The archive was left untouched.
    Preserved,
    /// Removing the archive was attempted and failed.
    DeleteFailed(String),
}

impl Disposition {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Deleted => "deleted",
            Self::Preserved => "preserved",
            Self::DeleteFailed(_) => "delete-failed",
        }
    }
}

/// A failed archive job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    /// Archive path.
    pub path: PathBuf,

    /// Stage that failed (see [`crate::ScrubError::stage`]).
    pub stage: &'static str,

    /// Rendered error message.
    pub message: String,

    /// What the failure policy did with the archive.
    pub disposition: Disposition,
}

/// Result of one archive job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The archive was rewritten.
    Rewritten(RewriteReport),
    /// The rewrite failed and the failure policy was applied.
    Failed(JobFailure),
}

/// Report of a whole scrub run.
///
/// # Examples
///
/// ```
/// use zipscrub_core::ScrubReport;
///
/// let report = ScrubReport::default();
/// assert_eq!(report.archives_found, 0);
/// assert!(!report.has_failures());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScrubReport {
    /// Number of archives discovered and dispatched.
    pub archives_found: usize,

    /// Number of archives rewritten successfully.
    pub archives_rewritten: usize,

    /// Total excluded entries across rewritten archives.
    pub entries_excluded: usize,

    /// Total placeholder substitutions across rewritten archives.
    pub placeholders_written: usize,

    /// Total entries copied unchanged across rewritten archives.
    pub entries_copied: usize,

    /// Total archive bytes before rewriting (successful jobs only).
    pub bytes_before: u64,

    /// Total archive bytes after rewriting (successful jobs only).
    pub bytes_after: u64,

    /// Failed jobs.
    pub failures: Vec<JobFailure>,

    /// Rendered traversal errors.
    pub traversal_errors: Vec<String>,

    /// Number of workers used.
    pub workers: usize,

    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl ScrubReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a successful rewrite into the totals.
    pub fn record_rewrite(&mut self, report: &RewriteReport) {
        self.archives_rewritten += 1;
        self.entries_excluded += report.excluded.len();
        self.placeholders_written += report.placeholders_written;
        self.entries_copied += report.entries_copied;
        self.bytes_before += report.bytes_before;
        self.bytes_after += report.bytes_after;
    }

    /// Records a failed job.
    pub fn record_failure(&mut self, failure: JobFailure) {
        self.failures.push(failure);
    }

    /// Folds a job outcome into the totals.
    pub fn record_outcome(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Rewritten(report) => self.record_rewrite(&report),
            JobOutcome::Failed(failure) => self.record_failure(failure),
        }
    }

    /// Returns the number of archives removed by the failure policy.
    #[must_use]
    pub fn archives_deleted(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.disposition == Disposition::Deleted)
            .count()
    }

    /// Returns whether any job failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rewrite_accumulates() {
        let mut report = ScrubReport::new();
        let rewrite = RewriteReport {
            excluded: vec!["LICENSE".into(), "main.lua".into()],
            placeholders_written: 4,
            entries_copied: 1,
            directories_copied: 1,
            bytes_before: 1000,
            bytes_after: 400,
            duration: Duration::from_millis(5),
        };

        report.record_rewrite(&rewrite);
        report.record_rewrite(&rewrite);

        assert_eq!(report.archives_rewritten, 2);
        assert_eq!(report.entries_excluded, 4);
        assert_eq!(report.placeholders_written, 8);
        assert_eq!(report.entries_copied, 2);
        assert_eq!(report.bytes_before, 2000);
        assert_eq!(report.bytes_after, 800);
    }

    #[test]
    fn test_archives_deleted_counts_only_deleted() {
        let mut report = ScrubReport::new();
        for disposition in [
            Disposition::Deleted,
            Disposition::Preserved,
            Disposition::DeleteFailed("busy".into()),
            Disposition::Deleted,
        ] {
            report.record_failure(JobFailure {
                path: PathBuf::from("x.zip"),
                stage: "open",
                message: "bad".into(),
                disposition,
            });
        }
        assert!(report.has_failures());
        assert_eq!(report.archives_deleted(), 2);
    }
}
