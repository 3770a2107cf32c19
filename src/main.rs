//! CLI entry point for the mediarr sync tool.

use anyhow::{Context, Result};
use clap::Parser;
use mediarr::{DebridClient, MdbListClient, RadarrClient, SonarrClient, load_config, run_once};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("mediarr starting");

    let config = load_config(&args.config)
        .with_context(|| format!("cannot load config from {}", args.config.display()))?;

    let debrid = match &config.real_debrid.base_url {
        Some(base_url) => DebridClient::with_base_url(&config.real_debrid.token, base_url),
        None => DebridClient::new(&config.real_debrid.token),
    }
    .context("failed to build Real-Debrid client")?;

    let mdblist = match &config.mdblist.base_url {
        Some(base_url) => MdbListClient::with_base_url(&config.mdblist.api_key, base_url),
        None => MdbListClient::new(&config.mdblist.api_key),
    }
    .context("failed to build MDBList client")?;

    let radarr = RadarrClient::new(&config.radarr).context("failed to build Radarr client")?;
    let sonarr = SonarrClient::new(&config.sonarr).context("failed to build Sonarr client")?;

    let now = chrono::Local::now().naive_local();
    let outcome = run_once(now, &config, &debrid, &mdblist, &radarr, &sonarr)
        .await
        .context("sync run failed")?;

    if outcome.suppressed_by_blackout {
        info!("run suppressed by blackout window, nothing done");
    } else {
        info!(
            movies_added = outcome.movies_added,
            shows_added = outcome.shows_added,
            "sync complete"
        );
    }

    Ok(())
}
