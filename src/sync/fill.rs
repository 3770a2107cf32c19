//! Bounded, deduplicating addition loop shared by the movie and show phases.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::clients::{Library, MediaItem, MediaKind};
use crate::config::ListRef;

/// Drives bounded addition attempts against a downstream manager.
///
/// Traverses `lists_in_order` (the rotation sequence; entries may repeat),
/// scanning each list's items in source order. Items whose kind does not
/// match the phase, whose external id is missing, or whose id is already in
/// `existing_ids` are skipped. The first eligible item of a list gets a
/// lookup-then-create attempt; on success the id joins the working set and
/// scanning advances to the next list in rotation. Lookup or create failures
/// are non-fatal and scanning continues with the next item of the same list.
///
/// Stops once `target` additions succeeded or all candidate lists are
/// exhausted, and returns the number of successful additions. Lists absent
/// from `items_by_list` (failed fetches) contribute nothing.
pub async fn fill(
    lists_in_order: &[&ListRef],
    items_by_list: &HashMap<String, Vec<MediaItem>>,
    existing_ids: &mut HashSet<u64>,
    target: u32,
    kind: MediaKind,
    library: &dyn Library,
) -> u32 {
    let mut added = 0;

    'lists: for list in lists_in_order {
        if added >= target {
            break;
        }
        let Some(items) = items_by_list.get(&list.id) else {
            continue;
        };

        for item in items {
            if added >= target {
                break 'lists;
            }
            if item.kind != Some(kind) {
                continue;
            }
            let Some(tmdb_id) = item.tmdb_id else {
                continue;
            };
            if existing_ids.contains(&tmdb_id) {
                continue;
            }

            let payload = match library.lookup(tmdb_id).await {
                Ok(Some(payload)) => payload,
                Ok(None) => {
                    debug!(tmdb_id, "lookup found no match, trying next item");
                    continue;
                }
                Err(error) => {
                    warn!(tmdb_id, %error, "lookup failed, trying next item");
                    continue;
                }
            };

            match library.add(&payload, list).await {
                Ok(()) => {
                    added += 1;
                    existing_ids.insert(tmdb_id);
                    info!(tmdb_id, list = %list.name, %kind, added, "added entry");
                    // One success per list per pass; move to the next list.
                    continue 'lists;
                }
                Err(error) => {
                    warn!(tmdb_id, %error, "create failed, trying next item");
                }
            }
        }
    }

    added
}
