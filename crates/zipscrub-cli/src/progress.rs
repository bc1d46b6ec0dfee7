//! Progress bar implementation for CLI runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use std::time::Duration;

/// CLI progress bar over archives.
///
/// The total grows as traversal discovers archives, so the bar fills up
/// against a moving target. Cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a new CLI progress bar with an initial length of zero.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "⠋ Scrubbing [████████░░░░] 42/100 archives (12s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} {msg} [{bar:40.cyan/blue}] {pos}/{len} archives ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .with_key("elapsed", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_duration(state.elapsed())).unwrap_or(());
                })
                .progress_chars("█▓░"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    ///
    /// The bar draws to stderr, so that is the stream checked.
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }

    /// Records a newly discovered archive.
    pub fn archive_found(&self) {
        self.bar.inc_length(1);
    }

    /// Records a finished archive.
    pub fn archive_done(&self) {
        self.bar.inc(1);
    }

    /// Hides the bar while `f` writes to the terminal.
    pub fn suspend<F: FnOnce()>(&self, f: F) {
        self.bar.suspend(f);
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts duration to human-readable format.
fn humanize_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_duration() {
        assert_eq!(humanize_duration(Duration::from_secs(0)), "0s");
        assert_eq!(humanize_duration(Duration::from_secs(30)), "30s");
        assert_eq!(humanize_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(humanize_duration(Duration::from_secs(3661)), "1h1m");
    }

    #[test]
    fn test_progress_counts() {
        let progress = CliProgress::new("Testing");
        progress.archive_found();
        progress.archive_found();
        progress.archive_done();

        assert_eq!(progress.bar.length(), Some(2));
        assert_eq!(progress.bar.position(), 1);
    }
}
