//! Converts a backend capacity snapshot into the per-run download quota.
//!
//! Roughly half of total capacity is reserved as headroom before movies
//! consume any of it, and shows - which can spawn many simultaneous episode
//! downloads - require a larger absolute cushion before one is allowed.

use tracing::info;

/// Point-in-time usage/limit pair from the rate-limited debrid backend.
///
/// Fetched fresh each run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitySnapshot {
    /// Currently active downloads.
    pub used: u32,
    /// Maximum concurrent downloads the backend allows.
    pub limit: u32,
}

/// Per-run cap on new acquisitions, derived from a [`CapacitySnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadQuota {
    /// How many movies may be added this run.
    pub movie_slots: u32,
    /// Whether a single show may be added this run.
    pub shows_eligible: bool,
}

/// Computes the run quota from a capacity snapshot.
///
/// `movie_slots = max(0, (limit - used) - limit / 2)`, never negative even
/// when usage exceeds the limit. Shows need at least 10 free slots.
#[must_use]
pub fn plan(snapshot: CapacitySnapshot) -> DownloadQuota {
    let limit = i64::from(snapshot.limit);
    let download_left = limit - i64::from(snapshot.used);
    let half_download = limit / 2;
    let movie_slots = u32::try_from((download_left - half_download).max(0)).unwrap_or(0);
    let quota = DownloadQuota {
        movie_slots,
        shows_eligible: download_left >= 10,
    };
    info!(
        movie_slots = quota.movie_slots,
        shows_eligible = quota.shows_eligible,
        "computed download quota"
    );
    quota
}
