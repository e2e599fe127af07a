//! Relative date resolution for model-supplied due dates.
//!
//! Models are prompted with examples like `"due_date": "tomorrow"`, so the
//! phrases they return are resolved against a caller-supplied reference time
//! into ISO-8601 timestamps before anything is stored.
//!
//! # Recognized phrases
//!
//! Matching is case-insensitive and ignores surrounding whitespace. The first
//! rule that matches wins:
//!
//! 1. `today`, `now`, `tomorrow`, `next week`, `next month`
//! 2. `in <N> day|week|month[s]`, found anywhere in the phrase (even inside
//!    a word, so `within 3 days` matches)
//! 3. `<N> day|week|month[s] from now`, found anywhere in the phrase
//!
//! A month is always 30 days. Anything else, including strings that are
//! already timestamps, is returned untouched.

use std::sync::LazyLock;

use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;

/// Output format: `2025-03-15T09:30:00`, with fractional seconds only when non-zero.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;

static IN_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"in\s+(\d+)\s+(day|week|month)s?").expect("valid `in N units` pattern")
});

static AMOUNT_FROM_NOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+(day|week|month)s?\s+from\s+now")
        .expect("valid `N units from now` pattern")
});

/// Resolve `phrase` against `now`, returning an ISO-8601 timestamp string.
///
/// Unrecognized phrases come back exactly as given (not lower-cased or
/// trimmed). An offset too large to represent is treated as unrecognized.
pub fn resolve_date(phrase: &str, now: NaiveDateTime) -> String {
    match resolve(phrase, now) {
        Some(ts) => format_timestamp(ts),
        None => phrase.to_string(),
    }
}

/// Format a timestamp the way resolved dates are emitted.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(ISO_FORMAT).to_string()
}

fn resolve(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lower = phrase.trim().to_lowercase();

    let exact = match lower.as_str() {
        "today" | "now" => Some(0),
        "tomorrow" => Some(1),
        "next week" => Some(DAYS_PER_WEEK),
        "next month" => Some(DAYS_PER_MONTH),
        _ => None,
    };
    if let Some(days) = exact {
        return shift(now, days);
    }

    // A pattern whose amount cannot be represented falls through to the next one.
    [&*IN_AMOUNT, &*AMOUNT_FROM_NOW]
        .into_iter()
        .find_map(|pattern| {
            let caps = pattern.captures(&lower)?;
            shift(now, amount_in_days(&caps[1], &caps[2])?)
        })
}

fn amount_in_days(amount: &str, unit: &str) -> Option<i64> {
    let amount: i64 = amount.parse().ok()?;
    let per_unit = match unit {
        "day" => 1,
        "week" => DAYS_PER_WEEK,
        "month" => DAYS_PER_MONTH,
        _ => return None,
    };
    amount.checked_mul(per_unit)
}

fn shift(now: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    now.checked_add_signed(TimeDelta::try_days(days)?)
}
