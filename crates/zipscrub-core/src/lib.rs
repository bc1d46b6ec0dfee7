//! In-place zip rewriting that swaps PNG images for a placeholder.
//!
//! `zipscrub-core` walks a directory tree, finds zip archives, and rewrites
//! each one in place: entries such as sources, scripts, and licenses are
//! dropped, every remaining `.png` entry gets the placeholder image as its
//! content, and everything else is copied unchanged. Archives are processed
//! concurrently on a bounded worker pool.
//!
//! # Examples
//!
//! ```no_run
//! use zipscrub_core::NoopObserver;
//! use zipscrub_core::Placeholder;
//! use zipscrub_core::ScrubConfig;
//! use zipscrub_core::Scrubber;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let placeholder = Placeholder::load("./placeholder.png")?;
//! let config = ScrubConfig::default().with_root("/srv/mods");
//! let report = Scrubber::new(config, placeholder).run(&NoopObserver)?;
//! println!("Rewrote {} archives", report.archives_rewritten);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod filter;
pub mod observer;
pub mod placeholder;
pub mod policy;
pub mod report;
pub mod rewrite;
pub mod scheduler;
#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use config::ScrubConfig;
pub use error::Result;
pub use error::ScrubError;
pub use filter::should_exclude;
pub use observer::NoopObserver;
pub use observer::ScrubObserver;
pub use placeholder::DEFAULT_PLACEHOLDER_PATH;
pub use placeholder::Placeholder;
pub use policy::DeleteOnFailure;
pub use policy::FailurePolicy;
pub use policy::PreserveOnFailure;
pub use report::Disposition;
pub use report::JobFailure;
pub use report::JobOutcome;
pub use report::RewriteReport;
pub use report::ScrubReport;
pub use rewrite::rewrite_archive;
pub use rewrite::rewrite_zip;
pub use scheduler::Scrubber;
