//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use zipscrub_core::JobFailure;
use zipscrub_core::ScrubReport;

/// Common output formatter trait.
///
/// Event methods are called from worker threads while a run is in progress.
pub trait OutputFormatter: Sync {
    /// Format the summary of a finished run
    fn format_scrub_result(&self, report: &ScrubReport) -> Result<()>;

    /// Format a single excluded entry
    fn format_excluded(&self, archive: &Path, name: &str);

    /// Format a failed archive job
    fn format_job_failure(&self, failure: &JobFailure);

    /// Format a directory traversal error
    fn format_traversal_error(&self, message: &str);

    /// Format the missing placeholder notice
    fn format_placeholder_missing(&self, path: &Path) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
