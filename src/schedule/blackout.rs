//! Blackout window evaluation: decides whether a run must be suppressed.
//!
//! Windows are configured externally and evaluated in order against the
//! current wall-clock instant. Boundary fields stay raw strings in the config
//! model and are parsed here at evaluation time, so a malformed window is
//! skipped with a warning instead of aborting the run.
//!
//! # Window shapes
//!
//! Branching on `recurrence`:
//! - `daily` + `start_time`/`end_time`: time-of-day range, inclusive on both
//!   ends; a start later than the end means the window crosses midnight.
//! - `daily` + `start_time`/`duration`: today's instance starts at
//!   `start_time` and runs for `duration`; an instance that started yesterday
//!   and spills past midnight is also honored.
//! - `once` + `start`/`end`: absolute instant range, inclusive.
//! - `once` + `start`/`duration`: absolute start plus span.
//!
//! A window providing none of these field combinations never matches.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::duration::parse_duration;

/// How a blackout window repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Recurs every day at the configured time of day.
    Daily,
    /// A one-time window at absolute instants.
    Once,
}

/// A configured quiet window during which runs must no-op.
///
/// Boundary fields are kept as raw strings; which ones are present selects
/// the matching rule (see module docs). Unknown or unparseable combinations
/// disable the window for the current evaluation only.
#[derive(Debug, Clone, Deserialize)]
pub struct BlackoutWindow {
    /// Display name used in logs.
    pub name: String,
    /// Disabled windows are skipped entirely.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Daily-recurring or one-time.
    pub recurrence: Recurrence,
    /// Time of day the window opens, e.g. `"23:00"` (daily windows).
    #[serde(default)]
    pub start_time: Option<String>,
    /// Time of day the window closes (daily range windows).
    #[serde(default)]
    pub end_time: Option<String>,
    /// Compound duration such as `"3h"` or `"1h 30m"` (span windows).
    #[serde(default)]
    pub duration: Option<String>,
    /// Absolute opening instant, e.g. `"2026-09-01 22:00"` (one-time windows).
    #[serde(default)]
    pub start: Option<String>,
    /// Absolute closing instant (one-time range windows).
    #[serde(default)]
    pub end: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// Returns true if `now` falls inside any enabled window.
///
/// Windows are checked in configured order and the first match short-circuits.
/// Disabled windows and windows with unusable boundary fields are skipped.
#[must_use]
pub fn is_blacked_out(now: NaiveDateTime, windows: &[BlackoutWindow]) -> bool {
    for window in windows {
        if !window.enabled {
            debug!(window = %window.name, "blackout window disabled, skipping");
            continue;
        }
        match window_matches(now, window) {
            Some(true) => {
                info!(window = %window.name, "current time is inside blackout window");
                return true;
            }
            Some(false) => {}
            None => {
                warn!(
                    window = %window.name,
                    "blackout window has unusable boundary fields, skipping"
                );
            }
        }
    }
    false
}

/// Evaluates one window. `None` means the boundary fields could not be parsed.
fn window_matches(now: NaiveDateTime, window: &BlackoutWindow) -> Option<bool> {
    match window.recurrence {
        Recurrence::Daily => {
            if let (Some(start), Some(end)) = (&window.start_time, &window.end_time) {
                let start = parse_time_of_day(start)?;
                let end = parse_time_of_day(end)?;
                Some(daily_range_contains(now.time(), start, end))
            } else if let (Some(start), Some(duration)) = (&window.start_time, &window.duration) {
                let start = parse_time_of_day(start)?;
                let span = parse_window_span(&window.name, duration)?;
                Some(daily_span_contains(now, start, span))
            } else {
                Some(false)
            }
        }
        Recurrence::Once => {
            if let (Some(start), Some(end)) = (&window.start, &window.end) {
                let start = parse_instant(start)?;
                let end = parse_instant(end)?;
                Some(start <= now && now <= end)
            } else if let (Some(start), Some(duration)) = (&window.start, &window.duration) {
                let start = parse_instant(start)?;
                let span = parse_window_span(&window.name, duration)?;
                Some(start <= now && now <= start + span)
            } else {
                Some(false)
            }
        }
    }
}

/// Daily time-of-day range check, inclusive on both ends.
///
/// A start later than the end means the window crosses midnight, e.g.
/// `22:00-02:00` matches `23:30` and `01:00` but not `12:00`.
fn daily_range_contains(now: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        start <= now && now <= end
    } else {
        now >= start || now <= end
    }
}

/// Daily start-plus-duration check.
///
/// When today's instance spills past midnight, the forward branch matches on
/// `now >= start` alone, without re-checking the end bound. That is the
/// historical behavior of this scheduler and is preserved deliberately; tests
/// pin it down rather than tightening it.
fn daily_span_contains(now: NaiveDateTime, start: NaiveTime, span: TimeDelta) -> bool {
    let start_today = now.date().and_time(start);
    let end_today = start_today + span;
    if end_today.date() > now.date() {
        if now >= start_today {
            return true;
        }
        // Yesterday's instance may still be open past midnight.
        let start_yesterday = start_today - TimeDelta::days(1);
        now <= start_yesterday + span
    } else {
        start_today <= now && now <= end_today
    }
}

/// Parses a time of day, accepting `HH:MM:SS` then `HH:MM`.
fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

/// Parses an absolute instant, accepting `YYYY-MM-DD HH:MM:SS` then
/// `YYYY-MM-DD HH:MM`.
fn parse_instant(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"))
        .ok()
}

/// Parses a window's duration field; a zero or fully-invalid span makes the
/// window unusable.
fn parse_window_span(window_name: &str, text: &str) -> Option<TimeDelta> {
    let parsed = parse_duration(text);
    for token in &parsed.skipped {
        warn!(window = window_name, token = %token, "ignoring malformed duration token");
    }
    if parsed.is_zero() { None } else { Some(parsed.total) }
}
