//! Diagnostic logging setup.
//!
//! User-facing lines go through the output formatter on stdout. The
//! subscriber installed here only carries library diagnostics, on stderr.

use tracing::level_filters::LevelFilter;

/// Maps the verbosity flags to a log level.
pub fn level(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::OFF
    } else if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::ERROR
    }
}

/// Installs the global fmt subscriber. A second call is a no-op.
pub fn init(verbose: bool, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level(false, false), LevelFilter::ERROR);
        assert_eq!(level(true, false), LevelFilter::DEBUG);
        assert_eq!(level(false, true), LevelFilter::OFF);
    }
}
