//! Zipscrub CLI - Command-line utility that replaces PNG images inside zip
//! archives with a placeholder.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse_from(cli::normalize_args(std::env::args_os()));

    logging::init(cli.verbose, cli.quiet);
    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    commands::scrub::execute(&cli, &*formatter)
}
