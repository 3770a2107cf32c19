//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Capacity-aware sync of curated media lists into Radarr and Sonarr.
///
/// Mediarr is intended to run from cron: each invocation performs exactly
/// one sync pass bounded by the debrid backend's remaining capacity.
#[derive(Parser, Debug)]
#[command(name = "mediarr")]
#[command(author, version, about)]
pub struct Args {
    /// Path to the JSON configuration file
    #[arg(short = 'f', long, default_value = "config.json")]
    pub config: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
