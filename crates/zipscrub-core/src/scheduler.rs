//! Directory traversal and bounded job dispatch.
//!
//! Traversal runs on the calling thread in walkdir order. Each archive it
//! finds becomes one job on a rayon pool of `workers` threads, so no more
//! than `workers` rewrites are ever in flight. `run` returns only after every
//! dispatched job has finished.

use crate::Placeholder;
use crate::Result;
use crate::ScrubConfig;
use crate::ScrubError;
use crate::filter;
use crate::observer::ScrubObserver;
use crate::policy::DeleteOnFailure;
use crate::policy::FailurePolicy;
use crate::report::JobFailure;
use crate::report::JobOutcome;
use crate::report::ScrubReport;
use crate::rewrite::rewrite_archive;
use std::path::Path;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;
use tracing::debug;
use tracing::warn;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Walks a directory tree and rewrites every archive in it.
///
/// # Examples
///
/// ```no_run
/// use zipscrub_core::NoopObserver;
/// use zipscrub_core::Placeholder;
/// use zipscrub_core::ScrubConfig;
/// use zipscrub_core::Scrubber;
///
/// let placeholder = Placeholder::load("./placeholder.png")?;
/// let scrubber = Scrubber::new(ScrubConfig::default().with_root("mods"), placeholder);
/// let report = scrubber.run(&NoopObserver)?;
/// println!("{} archives rewritten", report.archives_rewritten);
/// # Ok::<(), zipscrub_core::ScrubError>(())
/// ```
pub struct Scrubber {
    config: ScrubConfig,
    placeholder: Placeholder,
    policy: Box<dyn FailurePolicy>,
}

impl Scrubber {
    /// Creates a scrubber that deletes archives whose rewrite fails.
    #[must_use]
    pub fn new(config: ScrubConfig, placeholder: Placeholder) -> Self {
        Self {
            config,
            placeholder,
            policy: Box::new(DeleteOnFailure),
        }
    }

    /// Replaces the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: impl FailurePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Runs the scan to completion.
    ///
    /// Job failures and traversal errors are recorded in the report and never
    /// abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::ThreadPool`] if the worker pool cannot start.
    pub fn run(&self, observer: &dyn ScrubObserver) -> Result<ScrubReport> {
        let start = Instant::now();
        let workers = self.config.workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("zipscrub-worker-{i}"))
            .build()?;

        let mut report = ScrubReport::new();
        report.workers = workers;
        let (tx, rx) = mpsc::channel::<JobOutcome>();

        debug!(
            "scanning {} with {workers} workers",
            self.config.root.display()
        );

        pool.in_place_scope(|scope| {
            for entry in WalkDir::new(&self.config.root) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        let err = ScrubError::Walk(e);
                        warn!("{err}");
                        observer.on_traversal_error(&err);
                        report.traversal_errors.push(err.to_string());
                        continue;
                    }
                };

                if !self.is_archive(&entry) {
                    continue;
                }

                let path = entry.into_path();
                report.archives_found += 1;
                observer.on_archive_found(&path);

                let tx = tx.clone();
                scope.spawn(move |_| {
                    let outcome = self.run_job(&path, observer);
                    // The receiver outlives the scope.
                    let _ = tx.send(outcome);
                });
            }
        });
        drop(tx);

        for outcome in rx {
            report.record_outcome(outcome);
        }
        report.duration = start.elapsed();

        Ok(report)
    }

    /// Rewrites one archive and applies the failure policy if needed.
    fn run_job(&self, path: &Path, observer: &dyn ScrubObserver) -> JobOutcome {
        observer.on_job_start(path);

        let mut on_excluded = |name: &str| observer.on_entry_excluded(path, name);
        let outcome = match rewrite_archive(path, &self.placeholder, &mut on_excluded) {
            Ok(rewrite) => JobOutcome::Rewritten(rewrite),
            Err(err) => {
                debug_assert!(err.is_per_job(), "run-level error in job: {err}");
                warn!("Error processing zip file {}: {err}", path.display());
                let disposition = self.policy.on_failure(path, &err);
                JobOutcome::Failed(JobFailure {
                    path: PathBuf::from(path),
                    stage: err.stage(),
                    message: err.to_string(),
                    disposition,
                })
            }
        };

        observer.on_job_complete(path, &outcome);
        outcome
    }

    fn is_archive(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_file()
            && filter::extension(&entry.file_name().to_string_lossy())
                == self.config.archive_extension
    }
}
