//! CLI argument parsing using clap.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zipscrub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan for zip files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// Maximum number of archives rewritten at once (default: CPU count)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Keep archives whose rewrite failed instead of deleting them
    #[arg(long)]
    pub keep_failed: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Rewrites Go-style single-dash `-path` flags to their `--path` form.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-path") => OsString::from("--path"),
            Some(s) if s.starts_with("-path=") => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}
