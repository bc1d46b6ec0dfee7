//! JSON output formatter for machine-readable results.
//!
//! Emits a single document at the end of the run; per-entry events are
//! folded into it rather than printed as they happen.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use zipscrub_core::JobFailure;
use zipscrub_core::ScrubReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct FailureOutput {
    path: String,
    stage: &'static str,
    message: String,
    disposition: &'static str,
}

#[derive(Serialize)]
struct ScrubOutput {
    archives_found: usize,
    archives_rewritten: usize,
    archives_failed: usize,
    archives_deleted: usize,
    entries_excluded: usize,
    placeholders_written: usize,
    entries_copied: usize,
    bytes_before: u64,
    bytes_after: u64,
    workers: usize,
    duration_ms: u128,
    failures: Vec<FailureOutput>,
    traversal_errors: Vec<String>,
}

impl From<&ScrubReport> for ScrubOutput {
    fn from(report: &ScrubReport) -> Self {
        Self {
            archives_found: report.archives_found,
            archives_rewritten: report.archives_rewritten,
            archives_failed: report.failures.len(),
            archives_deleted: report.archives_deleted(),
            entries_excluded: report.entries_excluded,
            placeholders_written: report.placeholders_written,
            entries_copied: report.entries_copied,
            bytes_before: report.bytes_before,
            bytes_after: report.bytes_after,
            workers: report.workers,
            duration_ms: report.duration.as_millis(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureOutput {
                    path: f.path.display().to_string(),
                    stage: f.stage,
                    message: f.message.clone(),
                    disposition: f.disposition.label(),
                })
                .collect(),
            traversal_errors: report.traversal_errors.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_scrub_result(&self, report: &ScrubReport) -> Result<()> {
        let output = JsonOutput::success("scrub", ScrubOutput::from(report));
        Self::output(&output)
    }

    fn format_excluded(&self, _archive: &Path, _name: &str) {}

    fn format_job_failure(&self, _failure: &JobFailure) {}

    fn format_traversal_error(&self, _message: &str) {}

    fn format_placeholder_missing(&self, path: &Path) -> Result<()> {
        let output = JsonOutput::error(
            "scrub",
            format!("Placeholder PNG file not found at {}", path.display()),
        );
        Self::output(&output)
    }
}
