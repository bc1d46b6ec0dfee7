//! Error conversion utilities for CLI.
//!
//! Converts zipscrub-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use zipscrub_core::ScrubError;

/// Converts a run-level `ScrubError` to a user-friendly anyhow error.
pub fn convert_scrub_error(err: ScrubError) -> anyhow::Error {
    match err {
        ScrubError::PlaceholderRead { path, source } => {
            anyhow!(
                "Could not read placeholder image '{}': {}\n\
                 HINT: Put a readable PNG file at ./placeholder.png in the working directory.",
                path.display(),
                source
            )
        }
        ScrubError::ThreadPool(source) => {
            anyhow!(
                "Could not start worker pool: {source}\n\
                 HINT: Use --jobs to request fewer workers."
            )
        }
        _ => anyhow::Error::from(err).context("Scrub failed"),
    }
}
