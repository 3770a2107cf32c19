//! Hour-indexed rotation over configured source lists.
//!
//! Rotation is a pure function of the wall-clock hour and the configured
//! list count. No cursor is persisted: repeated runs within the same hour
//! always start at the same offset, and the cycle is periodic mod 24.

use crate::config::ListRef;

/// Produces the movie-phase list sequence for this run.
///
/// The sequence has length `slots` and walks the configured lists starting
/// at `hour % len`, wrapping as needed; it may repeat list references when
/// `slots` exceeds the list count. Callers fetch each distinct list's
/// contents only once. An empty `lists` slice yields an empty sequence,
/// which callers treat as "nothing configured".
#[must_use]
pub fn movie_rotation(hour: u32, lists: &[ListRef], slots: u32) -> Vec<&ListRef> {
    if lists.is_empty() {
        return Vec::new();
    }
    let start = hour as usize % lists.len();
    (0..slots as usize)
        .map(|i| &lists[(start + i) % lists.len()])
        .collect()
}

/// Selects the single show-phase list for this run, `lists[hour % len]`.
///
/// Returns `None` when no lists are configured.
#[must_use]
pub fn show_selection(hour: u32, lists: &[ListRef]) -> Option<&ListRef> {
    if lists.is_empty() {
        return None;
    }
    Some(&lists[hour as usize % lists.len()])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lists(names: &[&str]) -> Vec<ListRef> {
        names
            .iter()
            .map(|name| ListRef {
                id: format!("id-{name}"),
                name: (*name).to_string(),
                quality_profile_id: 1,
                root_folder_path: "/media".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_movie_rotation_starts_at_hour_offset() {
        let lists = lists(&["a", "b", "c"]);
        let order = movie_rotation(4, &lists, 3);
        let names: Vec<&str> = order.iter().map(|l| l.name.as_str()).collect();
        // 4 % 3 == 1, so rotation starts at "b".
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_movie_rotation_repeats_when_slots_exceed_list_count() {
        let lists = lists(&["a", "b"]);
        let order = movie_rotation(0, &lists, 5);
        let names: Vec<&str> = order.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn test_movie_rotation_periodic_mod_24() {
        let lists = lists(&["a", "b", "c", "d", "e"]);
        for hour in 0..24 {
            let today: Vec<&str> = movie_rotation(hour, &lists, 7)
                .iter()
                .map(|l| l.name.as_str())
                .collect();
            let tomorrow: Vec<&str> = movie_rotation(hour + 24, &lists, 7)
                .iter()
                .map(|l| l.name.as_str())
                .collect();
            assert_eq!(today, tomorrow, "rotation must be periodic at hour {hour}");
        }
    }

    #[test]
    fn test_movie_rotation_offset_consistent_with_modular_index() {
        let lists = lists(&["a", "b", "c"]);
        let order = movie_rotation(7, &lists, 6);
        for (i, list) in order.iter().enumerate() {
            assert_eq!(list.name, lists[(7 + i) % 3].name);
        }
    }

    #[test]
    fn test_movie_rotation_empty_lists_yields_empty_sequence() {
        assert!(movie_rotation(10, &[], 5).is_empty());
    }

    #[test]
    fn test_movie_rotation_zero_slots_yields_empty_sequence() {
        let lists = lists(&["a"]);
        assert!(movie_rotation(3, &lists, 0).is_empty());
    }

    #[test]
    fn test_show_selection_picks_hour_mod_len() {
        let lists = lists(&["a", "b", "c"]);
        assert_eq!(show_selection(0, &lists).unwrap().name, "a");
        assert_eq!(show_selection(5, &lists).unwrap().name, "c");
        assert_eq!(show_selection(23, &lists).unwrap().name, "c");
    }

    #[test]
    fn test_show_selection_single_list_always_selected() {
        let lists = lists(&["only"]);
        for hour in 0..24 {
            assert_eq!(show_selection(hour, &lists).unwrap().name, "only");
        }
    }

    #[test]
    fn test_show_selection_empty_lists_is_none() {
        assert!(show_selection(12, &[]).is_none());
    }
}
