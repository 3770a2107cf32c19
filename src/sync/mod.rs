//! Run orchestration: blackout gate, quota planning, rotation, and the
//! movie/show fill phases.
//!
//! One invocation of [`run_once`] is the unit of execution. All collaborator
//! calls happen strictly sequentially; nothing is persisted between runs, so
//! rotation and deduplication state are re-derived every time.

mod fill;

pub use fill::fill;

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;
use tracing::{info, warn};

use crate::capacity::{DownloadQuota, plan};
use crate::clients::{CapacitySource, Catalog, ClientError, Library, MediaKind};
use crate::config::AppConfig;
use crate::schedule::{is_blacked_out, movie_rotation, show_selection};

/// What a single run accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// True when a blackout window suppressed the run before any work.
    pub suppressed_by_blackout: bool,
    /// Movies successfully added this run.
    pub movies_added: u32,
    /// Shows successfully added this run (at most 1).
    pub shows_added: u32,
}

impl RunOutcome {
    fn suppressed() -> Self {
        Self {
            suppressed_by_blackout: true,
            movies_added: 0,
            shows_added: 0,
        }
    }
}

/// Errors that abort a run.
///
/// Everything else degrades softly inside the run; see the phase functions.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The capacity snapshot could not be fetched, so no quota exists.
    #[error("capacity snapshot unavailable: {source}")]
    CapacityUnavailable {
        /// The underlying client failure.
        #[source]
        source: ClientError,
    },
}

/// Executes one sync run at the given wall-clock instant.
///
/// Gates on blackout windows first, then derives the quota from a fresh
/// capacity snapshot and runs the movie and show fill phases independently.
///
/// # Errors
///
/// Returns [`SyncError::CapacityUnavailable`] when the capacity backend is
/// unreachable or malformed; all other collaborator failures degrade to
/// empty results and the run completes with reduced effectiveness.
pub async fn run_once(
    now: NaiveDateTime,
    config: &AppConfig,
    capacity: &dyn CapacitySource,
    catalog: &dyn Catalog,
    movie_library: &dyn Library,
    show_library: &dyn Library,
) -> Result<RunOutcome, SyncError> {
    if is_blacked_out(now, &config.blackouts) {
        info!("run suppressed by blackout window");
        return Ok(RunOutcome::suppressed());
    }

    let snapshot = capacity
        .active_count()
        .await
        .map_err(|source| SyncError::CapacityUnavailable { source })?;
    let quota = plan(snapshot);
    let hour = now.time().hour();

    let movies_added = movie_phase(hour, config, quota, catalog, movie_library).await;
    let shows_added = show_phase(hour, config, quota, catalog, show_library).await;

    Ok(RunOutcome {
        suppressed_by_blackout: false,
        movies_added,
        shows_added,
    })
}

/// Movie fill phase: hour-rotated multi-list traversal bounded by the quota.
async fn movie_phase(
    hour: u32,
    config: &AppConfig,
    quota: DownloadQuota,
    catalog: &dyn Catalog,
    library: &dyn Library,
) -> u32 {
    if config.movies.is_empty() {
        info!("no movie lists configured");
        return 0;
    }
    if quota.movie_slots == 0 {
        info!("no capacity for movies");
        return 0;
    }

    let order = movie_rotation(hour, &config.movies, quota.movie_slots);
    info!(
        start_list = %order.first().map_or("", |l| l.name.as_str()),
        slots = quota.movie_slots,
        "processing movie lists"
    );

    // Each distinct list's contents are fetched exactly once, even when the
    // rotation sequence repeats a list.
    let mut items_by_list = HashMap::new();
    for list in &config.movies {
        let items = fetch_list_soft(catalog, list).await;
        items_by_list.insert(list.id.clone(), items);
    }

    let mut existing = fetch_inventory_soft(library, "movie").await;
    let added = fill(
        &order,
        &items_by_list,
        &mut existing,
        quota.movie_slots,
        MediaKind::Movie,
        library,
    )
    .await;
    info!(added, "movie phase complete");
    added
}

/// Show fill phase: a single hour-selected list, at most one success.
async fn show_phase(
    hour: u32,
    config: &AppConfig,
    quota: DownloadQuota,
    catalog: &dyn Catalog,
    library: &dyn Library,
) -> u32 {
    if !quota.shows_eligible {
        info!("insufficient capacity for shows, skipping");
        return 0;
    }
    let Some(list) = show_selection(hour, &config.shows) else {
        info!("no show lists configured");
        return 0;
    };
    info!(list = %list.name, "processing show list");

    let items = fetch_list_soft(catalog, list).await;
    let items_by_list = HashMap::from([(list.id.clone(), items)]);
    let mut existing = fetch_inventory_soft(library, "show").await;

    let order = [list];
    let added = fill(
        &order,
        &items_by_list,
        &mut existing,
        1,
        MediaKind::Show,
        library,
    )
    .await;
    info!(added, "show phase complete");
    added
}

/// Fetches one list's contents, degrading errors to an empty sequence.
async fn fetch_list_soft(
    catalog: &dyn Catalog,
    list: &crate::config::ListRef,
) -> Vec<crate::clients::MediaItem> {
    match catalog.list_items(list).await {
        Ok(items) => {
            info!(list = %list.name, count = items.len(), "fetched list items");
            items
        }
        Err(error) => {
            warn!(list = %list.name, %error, "failed to fetch list, treating as empty");
            Vec::new()
        }
    }
}

/// Fetches a manager's inventory, degrading errors to an empty set.
///
/// An empty set risks re-submitting known items; the manager is expected to
/// reject those idempotently.
async fn fetch_inventory_soft(library: &dyn Library, what: &str) -> HashSet<u64> {
    match library.existing_ids().await {
        Ok(ids) => {
            info!(kind = what, count = ids.len(), "fetched existing library ids");
            ids
        }
        Err(error) => {
            warn!(kind = what, %error, "failed to fetch existing ids, treating as empty");
            HashSet::new()
        }
    }
}
