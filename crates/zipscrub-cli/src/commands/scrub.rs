//! Scrub command implementation.

use crate::cli::Cli;
use crate::error::convert_scrub_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use std::path::Path;
use zipscrub_core::DEFAULT_PLACEHOLDER_PATH;
use zipscrub_core::JobOutcome;
use zipscrub_core::Placeholder;
use zipscrub_core::PreserveOnFailure;
use zipscrub_core::ScrubConfig;
use zipscrub_core::ScrubError;
use zipscrub_core::ScrubObserver;
use zipscrub_core::Scrubber;

/// Forwards run events to the formatter and the progress bar.
struct CliObserver<'a> {
    formatter: &'a dyn OutputFormatter,
    progress: Option<CliProgress>,
}

impl CliObserver<'_> {
    fn emit<F: FnOnce()>(&self, f: F) {
        match &self.progress {
            Some(progress) => progress.suspend(f),
            None => f(),
        }
    }
}

impl ScrubObserver for CliObserver<'_> {
    fn on_archive_found(&self, _path: &Path) {
        if let Some(progress) = &self.progress {
            progress.archive_found();
        }
    }

    fn on_entry_excluded(&self, archive: &Path, name: &str) {
        self.emit(|| self.formatter.format_excluded(archive, name));
    }

    fn on_job_complete(&self, _path: &Path, outcome: &JobOutcome) {
        if let JobOutcome::Failed(failure) = outcome {
            self.emit(|| self.formatter.format_job_failure(failure));
        }
        if let Some(progress) = &self.progress {
            progress.archive_done();
        }
    }

    fn on_traversal_error(&self, error: &ScrubError) {
        let message = error.to_string();
        self.emit(|| self.formatter.format_traversal_error(&message));
    }
}

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let placeholder = match Placeholder::load(DEFAULT_PLACEHOLDER_PATH) {
        Ok(placeholder) => placeholder,
        Err(ScrubError::PlaceholderMissing { path }) => {
            return formatter.format_placeholder_missing(&path);
        }
        Err(e) => return Err(convert_scrub_error(e)),
    };

    let mut config = ScrubConfig::default().with_root(&cli.path);
    if let Some(jobs) = cli.jobs {
        config = config.with_workers(usize::from(jobs));
    }

    let mut scrubber = Scrubber::new(config, placeholder);
    if cli.keep_failed {
        scrubber = scrubber.with_failure_policy(PreserveOnFailure);
    }

    // Show progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let show_progress = !cli.quiet && !cli.json && CliProgress::should_show();
    let observer = CliObserver {
        formatter,
        progress: show_progress.then(|| CliProgress::new("Scrubbing")),
    };

    let report = scrubber.run(&observer).map_err(convert_scrub_error)?;
    drop(observer);

    formatter.format_scrub_result(&report)
}
