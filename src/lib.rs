//! Mediarr Core Library
//!
//! Capacity-aware sync of curated media lists into Radarr and Sonarr.
//! Each invocation fetches the remaining capacity of a rate-limited debrid
//! backend, derives a bounded download quota from it, rotates through the
//! configured MDBList lists by wall-clock hour, and adds new entries to the
//! downstream managers without duplicating existing library content.
//! Configured blackout windows suppress the whole run.
//!
//! # Architecture
//!
//! - [`capacity`] - Quota planning from a usage/limit snapshot
//! - [`clients`] - HTTP clients for Real-Debrid, MDBList, Radarr, Sonarr
//! - [`config`] - JSON configuration model
//! - [`schedule`] - Blackout windows, duration parsing, list rotation
//! - [`sync`] - Run orchestration and the bounded addition loop

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capacity;
pub mod clients;
pub mod config;
pub mod schedule;
pub mod sync;

// Re-export commonly used types
pub use capacity::{CapacitySnapshot, DownloadQuota, plan};
pub use clients::{
    CapacitySource, Catalog, ClientError, DebridClient, Library, MdbListClient, MediaItem,
    MediaKind, RadarrClient, SonarrClient,
};
pub use config::{AppConfig, ConfigError, ListRef, load_config};
pub use schedule::{BlackoutWindow, parse_duration};
pub use sync::{RunOutcome, SyncError, run_once};
