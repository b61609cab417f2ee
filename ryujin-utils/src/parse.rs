use std::time::Duration;

use twilight_model::id::{Id, marker::UserMarker};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Parse a target user from a raw argument (`<@id>`, `<@!id>`, or raw ID).
pub fn parse_target_user_id(raw: &str) -> Option<Id<UserMarker>> {
    let trimmed = raw.trim();

    let numeric = if trimmed.starts_with("<@") && trimmed.ends_with('>') {
        let without_wrappers = trimmed.strip_prefix("<@")?.strip_suffix('>')?;
        without_wrappers
            .strip_prefix('!')
            .unwrap_or(without_wrappers)
    } else {
        trimmed
    };

    let id = numeric.parse::<u64>().ok()?;

    Id::new_checked(id)
}

/// How long a moderation action lasts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DurationSpec {
    Permanent,
    /// Length in seconds. Zero is valid and expires immediately.
    Span(u64),
}

impl DurationSpec {
    pub fn is_permanent(self) -> bool {
        matches!(self, Self::Permanent)
    }

    pub fn as_duration(self) -> Option<Duration> {
        match self {
            Self::Permanent => None,
            Self::Span(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Unix timestamp at which a span started at `now_secs` runs out.
    pub fn expires_at(self, now_secs: u64) -> Option<u64> {
        match self {
            Self::Permanent => None,
            Self::Span(secs) => Some(now_secs.saturating_add(secs)),
        }
    }
}

/// Duration parse outcome that keeps rejected input visible to the caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsedDuration {
    Permanent,
    Span(u64),
    /// The raw input as the user typed it.
    Invalid(String),
}

impl ParsedDuration {
    /// Collapse rejected input into a permanent duration.
    pub fn or_permanent(self) -> DurationSpec {
        match self {
            Self::Permanent | Self::Invalid(_) => DurationSpec::Permanent,
            Self::Span(secs) => DurationSpec::Span(secs),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, or plain hours.
///
/// Absent input, `permanent`, and `perm` mean a permanent action. Anything that
/// does not parse also falls back to permanent; use [`parse_duration_strict`]
/// to tell those cases apart.
pub fn parse_duration(raw: Option<&str>) -> DurationSpec {
    parse_duration_strict(raw).or_permanent()
}

/// Parse a compact duration token, reporting unparseable input as
/// [`ParsedDuration::Invalid`].
pub fn parse_duration_strict(raw: Option<&str>) -> ParsedDuration {
    let Some(original) = raw else {
        return ParsedDuration::Permanent;
    };

    let value = original.trim().to_lowercase();
    if value.is_empty() || value == "permanent" || value == "perm" {
        return ParsedDuration::Permanent;
    }

    let mut chars = value.chars();
    let unit = chars.next_back();

    let (number_raw, multiplier) = match unit {
        Some('d') => (chars.as_str(), SECS_PER_DAY),
        Some('h') => (chars.as_str(), SECS_PER_HOUR),
        Some('m') => (chars.as_str(), SECS_PER_MINUTE),
        Some('s') => (chars.as_str(), 1),
        Some(last) if last.is_ascii_digit() => (value.as_str(), SECS_PER_HOUR),
        _ => return ParsedDuration::Invalid(original.to_owned()),
    };

    // `u64` parsing also rejects a leading minus sign.
    let Some(secs) = number_raw
        .parse::<u64>()
        .ok()
        .and_then(|number| number.checked_mul(multiplier))
    else {
        return ParsedDuration::Invalid(original.to_owned());
    };

    ParsedDuration::Span(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_are_permanent() {
        assert_eq!(parse_duration(None), DurationSpec::Permanent);
        assert_eq!(parse_duration(Some("")), DurationSpec::Permanent);
        assert_eq!(parse_duration(Some("   ")), DurationSpec::Permanent);
    }

    #[test]
    fn permanent_keywords_ignore_case() {
        assert_eq!(parse_duration(Some("PERM")), DurationSpec::Permanent);
        assert_eq!(parse_duration(Some("Permanent")), DurationSpec::Permanent);
        assert_eq!(
            parse_duration_strict(Some("perm")),
            ParsedDuration::Permanent
        );
    }

    #[test]
    fn unit_suffixes_convert_to_seconds() {
        assert_eq!(parse_duration(Some("2d")), DurationSpec::Span(172_800));
        assert_eq!(parse_duration(Some("3h")), DurationSpec::Span(10_800));
        assert_eq!(parse_duration(Some("45m")), DurationSpec::Span(2_700));
        assert_eq!(parse_duration(Some("30s")), DurationSpec::Span(30));
        assert_eq!(parse_duration(Some("30S")), DurationSpec::Span(30));
    }

    #[test]
    fn bare_integer_means_hours() {
        assert_eq!(parse_duration(Some("5")), DurationSpec::Span(18_000));
    }

    #[test]
    fn zero_length_span_is_kept() {
        assert_eq!(parse_duration(Some("0s")), DurationSpec::Span(0));
        assert_eq!(DurationSpec::Span(0).expires_at(100), Some(100));
    }

    #[test]
    fn malformed_input_falls_back_to_permanent() {
        for raw in ["abc", "-5h", "5x", "h", "1.5h", "99999999999999999999d"] {
            assert_eq!(parse_duration(Some(raw)), DurationSpec::Permanent, "{raw}");
        }
    }

    #[test]
    fn strict_parse_keeps_original_input() {
        assert_eq!(
            parse_duration_strict(Some("5X")),
            ParsedDuration::Invalid("5X".to_owned())
        );
        assert!(parse_duration_strict(Some("-5h")).is_invalid());
        assert!(!parse_duration_strict(Some("5h")).is_invalid());
    }

    #[test]
    fn overflowing_multiplication_is_invalid() {
        let raw = format!("{}d", u64::MAX / 10);
        assert!(parse_duration_strict(Some(&raw)).is_invalid());
    }

    #[test]
    fn spans_expose_std_duration() {
        assert_eq!(
            DurationSpec::Span(90).as_duration(),
            Some(Duration::from_secs(90))
        );
        assert_eq!(DurationSpec::Permanent.as_duration(), None);
        assert_eq!(DurationSpec::Permanent.expires_at(100), None);
        assert_eq!(DurationSpec::Span(u64::MAX).expires_at(5), Some(u64::MAX));
    }

    #[test]
    fn target_user_accepts_mentions_and_raw_ids() {
        assert_eq!(parse_target_user_id("<@42>"), Some(Id::new(42)));
        assert_eq!(parse_target_user_id("<@!42>"), Some(Id::new(42)));
        assert_eq!(parse_target_user_id(" 42 "), Some(Id::new(42)));
        assert_eq!(parse_target_user_id("0"), None);
        assert_eq!(parse_target_user_id("<@abc>"), None);
    }
}
