//! Shared utilities for CLI commands.

use std::io::Write;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use pt_core::{Outcome, is_valid_rate};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap_or_else(|err| {
        unreachable!("relative time pattern is a valid literal: {err}")
    })
});

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Local wall-clock formats accepted for timestamps.
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a datetime string as ISO 8601, local wall-clock time, or relative time.
///
/// Supports:
/// - ISO 8601: "2026-01-15T10:30:00Z"
/// - Local: "2026-01-15 10:30" (in `tz`)
/// - Relative to `now`: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime<Tz: TimeZone>(
    s: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            let Some(local) = tz.from_local_datetime(&naive).earliest() else {
                anyhow::bail!("{s} does not exist in the local time zone");
            };
            return Ok(local.with_timezone(&Utc));
        }
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use ISO 8601 (e.g., 2026-01-15T10:30:00Z), local (e.g., '2026-01-15 10:30') or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    Ok(now - Duration::minutes(n * minutes_per_unit))
}

/// Formats minutes as "Xh Ym" if >= 1 hour, "Ym" otherwise.
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours >= 1 {
        format!("{hours}h {rest}m")
    } else {
        format!("{rest}m")
    }
}

/// Formats fractional hours as a duration, rounded to the minute.
#[expect(
    clippy::cast_possible_truncation,
    reason = "tracked hours are far below i64 range"
)]
pub fn format_hours(hours: f64) -> String {
    format_duration((hours * 60.0).round() as i64)
}

pub fn format_money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Formats an instant as local wall-clock time in `tz`.
pub fn format_local<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant
        .with_timezone(tz)
        .naive_local()
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Clap value parser for hourly rates.
pub fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid hourly rate: {s}"))?;
    if !is_valid_rate(rate) {
        return Err(format!("hourly rate must be a non-negative number, got {s}"));
    }
    Ok(rate)
}

/// Returns the trimmed value, or `default` when it is missing or blank.
pub fn non_blank_or(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Prints the result of a mutation. Ignored mutations are reported, not failed.
pub fn report_outcome<W: Write, T>(
    writer: &mut W,
    outcome: Outcome<T>,
    applied: impl FnOnce(T) -> String,
) -> anyhow::Result<()> {
    match outcome {
        Outcome::Applied(value) => writeln!(writer, "{}", applied(value))?,
        Outcome::Ignored(reason) => writeln!(writer, "Ignored: {reason}")?,
    }
    Ok(())
}
