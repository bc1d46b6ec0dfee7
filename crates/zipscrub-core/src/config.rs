//! Configuration for scrub runs.

use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Worker count used when the host parallelism cannot be queried.
const FALLBACK_WORKERS: usize = 4;

/// Configuration for a scrub run.
///
/// # Examples
///
/// ```
/// use zipscrub_core::ScrubConfig;
///
/// let config = ScrubConfig::default().with_root("mods").with_workers(2);
/// assert_eq!(config.workers, 2);
/// assert_eq!(config.archive_extension, ".zip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubConfig {
    /// Root directory to scan recursively.
    ///
    /// Default: `.`.
    pub root: PathBuf,

    /// Maximum number of archives rewritten at once.
    ///
    /// Default: the number of available processing units.
    pub workers: usize,

    /// File extension, dot included, that marks a file as an archive.
    /// Matched case-sensitively.
    ///
    /// Default: `.zip`.
    pub archive_extension: String,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            workers: default_workers(),
            archive_extension: ".zip".to_string(),
        }
    }
}

impl ScrubConfig {
    /// Creates a new `ScrubConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the worker count. Zero is raised to one.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// Returns the number of available processing units on this host.
#[must_use]
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_WORKERS)
}
