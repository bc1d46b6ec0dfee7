//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use zipscrub_core::Disposition;
use zipscrub_core::JobFailure;
use zipscrub_core::ScrubReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn write_summary(&self, report: &ScrubReport) {
        let _ = self.term.write_line(&format!(
            "  Archives found:     {}",
            Self::format_number(report.archives_found)
        ));
        let _ = self.term.write_line(&format!(
            "  Archives rewritten: {}",
            Self::format_number(report.archives_rewritten)
        ));
        if report.has_failures() {
            let _ = self.term.write_line(&format!(
                "  Archives failed:    {} ({} deleted)",
                Self::format_number(report.failures.len()),
                report.archives_deleted()
            ));
        }
        let _ = self.term.write_line(&format!(
            "  Images replaced:    {}",
            Self::format_number(report.placeholders_written)
        ));
        let _ = self.term.write_line(&format!(
            "  Entries excluded:   {}",
            Self::format_number(report.entries_excluded)
        ));
        let _ = self.term.write_line(&format!(
            "  Size:               {} -> {}",
            Self::format_size(report.bytes_before),
            Self::format_size(report.bytes_after)
        ));
        let _ = self.term.write_line(&format!(
            "  Workers:            {}",
            report.workers
        ));
        let _ = self
            .term
            .write_line(&format!("  Duration:           {:?}", report.duration));
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_scrub_result(&self, report: &ScrubReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{}", style("Processing complete.").green().bold()));
        } else {
            let _ = self.term.write_line("Processing complete.");
        }

        if self.verbose {
            self.write_summary(report);
        }

        Ok(())
    }

    fn format_excluded(&self, _archive: &Path, name: &str) {
        if self.quiet {
            return;
        }

        let _ = self.term.write_line(&format!("Excluding file {name}"));
    }

    fn format_job_failure(&self, failure: &JobFailure) {
        // Always show errors, even in quiet mode
        let line = format!(
            "Error processing zip file {}: {}",
            failure.path.display(),
            failure.message
        );
        if self.use_colors {
            let _ = self.term.write_line(&format!("{}", style(line).red()));
        } else {
            let _ = self.term.write_line(&line);
        }

        match &failure.disposition {
            Disposition::DeleteFailed(reason) => {
                let _ = self
                    .term
                    .write_line(&format!("  could not delete archive: {reason}"));
            }
            disposition if self.verbose => {
                let _ = self
                    .term
                    .write_line(&format!("  archive {}", disposition.label()));
            }
            _ => {}
        }
    }

    fn format_traversal_error(&self, message: &str) {
        if self.use_colors {
            let _ = self.term.write_line(&format!("{}", style(message).red()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn format_placeholder_missing(&self, path: &Path) -> Result<()> {
        let _ = self.term.write_line(&format!(
            "Placeholder PNG file not found at {}",
            path.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(HumanFormatter::format_size(1024), "1.0 KB");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
        assert_eq!(HumanFormatter::format_size(1024 * 1024), "1.0 MB");
        assert_eq!(HumanFormatter::format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }
}
