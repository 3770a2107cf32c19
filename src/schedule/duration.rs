//! Lenient parser for compound human-readable duration strings.
//!
//! Input is whitespace-separated tokens, each an integer magnitude followed
//! by exactly one unit suffix: `s` seconds, `m` minutes, `h` hours, `d` days,
//! `w` weeks, `y` years (approximated as 365 days). Tokens that fail to parse
//! are collected for the caller to log; they never fail the whole parse.

use chrono::TimeDelta;

/// Result of parsing a compound duration string.
///
/// Mirrors the partial-success shape used elsewhere in the crate: the sum of
/// everything that parsed plus the tokens that did not (for logging).
#[derive(Debug)]
pub struct ParsedDuration {
    /// Sum of all successfully parsed components.
    pub total: TimeDelta,
    /// Tokens that could not be parsed (bad magnitude or unknown suffix).
    pub skipped: Vec<String>,
}

impl Default for ParsedDuration {
    fn default() -> Self {
        Self {
            total: TimeDelta::zero(),
            skipped: Vec::new(),
        }
    }
}

impl ParsedDuration {
    /// Returns true if no component parsed successfully.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.total == TimeDelta::zero()
    }
}

/// Parses a compound duration string such as `"1d 2h 30m"`.
///
/// Each token is parsed independently; failures are accumulated in
/// [`ParsedDuration::skipped`] rather than aborting. Empty or fully-invalid
/// input yields a zero-length duration.
#[must_use]
pub fn parse_duration(text: &str) -> ParsedDuration {
    let mut result = ParsedDuration::default();
    for token in text.split_whitespace() {
        match parse_token(token) {
            Some(component) => result.total += component,
            None => result.skipped.push(token.to_string()),
        }
    }
    result
}

/// Parses a single `<magnitude><suffix>` token, e.g. `"30m"`.
fn parse_token(token: &str) -> Option<TimeDelta> {
    let suffix = token.chars().last()?;
    let magnitude_text = &token[..token.len() - suffix.len_utf8()];
    let magnitude: i64 = magnitude_text.parse().ok()?;
    if magnitude < 0 {
        return None;
    }
    match suffix {
        's' => TimeDelta::try_seconds(magnitude),
        'm' => TimeDelta::try_minutes(magnitude),
        'h' => TimeDelta::try_hours(magnitude),
        'd' => TimeDelta::try_days(magnitude),
        'w' => TimeDelta::try_weeks(magnitude),
        'y' => TimeDelta::try_days(magnitude.checked_mul(365)?),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_compound() {
        let parsed = parse_duration("1d 2h 30m");
        assert_eq!(
            parsed.total,
            TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::minutes(30)
        );
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_parse_duration_weeks() {
        let parsed = parse_duration("2w");
        assert_eq!(parsed.total, TimeDelta::days(14));
    }

    #[test]
    fn test_parse_duration_years_approximate_365_days() {
        let parsed = parse_duration("1y");
        assert_eq!(parsed.total, TimeDelta::days(365));
    }

    #[test]
    fn test_parse_duration_seconds() {
        let parsed = parse_duration("45s");
        assert_eq!(parsed.total, TimeDelta::seconds(45));
    }

    #[test]
    fn test_parse_duration_malformed_token_skipped() {
        let parsed = parse_duration("xx 2h");
        assert_eq!(parsed.total, TimeDelta::hours(2));
        assert_eq!(parsed.skipped, vec!["xx".to_string()]);
    }

    #[test]
    fn test_parse_duration_unknown_suffix_skipped() {
        let parsed = parse_duration("10q 5m");
        assert_eq!(parsed.total, TimeDelta::minutes(5));
        assert_eq!(parsed.skipped, vec!["10q".to_string()]);
    }

    #[test]
    fn test_parse_duration_missing_magnitude_skipped() {
        let parsed = parse_duration("h");
        assert!(parsed.is_zero());
        assert_eq!(parsed.skipped, vec!["h".to_string()]);
    }

    #[test]
    fn test_parse_duration_negative_magnitude_skipped() {
        let parsed = parse_duration("-5m 1h");
        assert_eq!(parsed.total, TimeDelta::hours(1));
        assert_eq!(parsed.skipped, vec!["-5m".to_string()]);
    }

    #[test]
    fn test_parse_duration_empty_input_is_zero() {
        let parsed = parse_duration("");
        assert!(parsed.is_zero());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_parse_duration_fully_invalid_input_is_zero() {
        let parsed = parse_duration("foo bar baz");
        assert!(parsed.is_zero());
        assert_eq!(parsed.skipped.len(), 3);
    }

    #[test]
    fn test_parse_duration_extra_whitespace_tolerated() {
        let parsed = parse_duration("  1h   30m ");
        assert_eq!(parsed.total, TimeDelta::minutes(90));
    }
}
