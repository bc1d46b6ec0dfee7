//! Error types for archive scrubbing operations.

use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Result type alias using `ScrubError`.
pub type Result<T> = std::result::Result<T, ScrubError>;

/// Errors that can occur while scrubbing archives.
///
/// The rewrite variants name the stage that failed so a job failure can be
/// reported with enough context to act on.
#[derive(Error, Debug)]
pub enum ScrubError {
    /// Placeholder image is not present at the expected location.
    #[error("placeholder image not found at {path}")]
    PlaceholderMissing {
        /// Expected placeholder location.
        path: PathBuf,
    },

    /// Placeholder image exists but could not be read.
    #[error("could not read placeholder image {path}: {source}")]
    PlaceholderRead {
        /// Placeholder location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Archive could not be opened or its central directory parsed.
    #[error("could not open zip file: {source}")]
    Open {
        /// Archive path.
        path: PathBuf,
        /// Underlying zip error.
        #[source]
        source: ZipError,
    },

    /// Several central directory records share a name.
    #[error("zip file declares {declared} entries but only {distinct} have distinct names")]
    DuplicateEntries {
        /// Entry count recorded in the end of central directory record.
        declared: u64,
        /// Entries left once duplicate names are merged.
        distinct: usize,
    },

    /// An entry header could not be read from the source archive.
    #[error("could not read entry #{index}: {source}")]
    ReadEntry {
        /// Zero-based entry index in the source archive.
        index: usize,
        /// Underlying zip error.
        #[source]
        source: ZipError,
    },

    /// An entry could not be created in the output archive.
    #[error("could not create file {name} in new zip: {source}")]
    WriteEntry {
        /// Entry name.
        name: String,
        /// Underlying zip error.
        #[source]
        source: ZipError,
    },

    /// Entry content could not be streamed into the output archive.
    #[error("could not copy content of {name}: {source}")]
    CopyEntry {
        /// Entry name.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Output archive could not be finalized.
    #[error("could not close new zip writer: {0}")]
    Finalize(#[source] ZipError),

    /// Original archive could not be overwritten with the new content.
    #[error("could not overwrite zip file: {source}")]
    Overwrite {
        /// Archive path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed for part of the tree.
    #[error("error walking the directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Worker pool could not be started.
    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScrubError {
    /// Returns a short name for the stage that failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipscrub_core::ScrubError;
    ///
    /// let err = ScrubError::Finalize(zip::result::ZipError::FileNotFound);
    /// assert_eq!(err.stage(), "finalize");
    /// ```
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::PlaceholderMissing { .. } | Self::PlaceholderRead { .. } => "placeholder",
            Self::Open { .. } | Self::DuplicateEntries { .. } => "open",
            Self::ReadEntry { .. } => "read",
            Self::WriteEntry { .. } => "write",
            Self::CopyEntry { .. } => "copy",
            Self::Finalize(_) => "finalize",
            Self::Overwrite { .. } => "overwrite",
            Self::Walk(_) => "walk",
            Self::ThreadPool(_) => "startup",
        }
    }

    /// Returns `true` if this error belongs to a single archive job.
    ///
    /// Per-job errors trigger the failure policy and never abort the run.
    #[must_use]
    pub const fn is_per_job(&self) -> bool {
        matches!(
            self,
            Self::Open { .. }
                | Self::DuplicateEntries { .. }
                | Self::ReadEntry { .. }
                | Self::WriteEntry { .. }
                | Self::CopyEntry { .. }
                | Self::Finalize(_)
                | Self::Overwrite { .. }
        )
    }
}
