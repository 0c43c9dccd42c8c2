use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::{GitlineError, Result};
use crate::model::DateRange;

/// Parse a user-supplied point in time: RFC3339, `YYYY-MM-DD`, or a
/// humantime duration interpreted as "that long ago" (e.g. `90d`, `2 weeks`).
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    let trimmed = input.trim().trim_end_matches(" ago").trim();
    if let Ok(duration) = humantime::parse_duration(trimmed) {
        let duration = chrono::Duration::from_std(duration)
            .map_err(|_| GitlineError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(Utc::now() - duration);
    }

    Err(GitlineError::InvalidDate(format!(
        "Cannot parse '{input}' as RFC3339, YYYY-MM-DD, or a duration"
    )))
}

/// Resolve the selected window from optional `--since`/`--until` strings,
/// clamped into the dataset's absolute range. With neither given, the whole
/// absolute range is selected.
pub fn resolve_window(
    absolute: &DateRange,
    since: Option<&str>,
    until: Option<&str>,
) -> Result<DateRange> {
    let start = match since {
        Some(s) => absolute.clamp(parse_date(s)?),
        None => absolute.start(),
    };
    let end = match until {
        Some(u) => absolute.clamp(parse_date(u)?),
        None => absolute.end(),
    };
    if start > end {
        return Err(GitlineError::InvalidRange(format!(
            "since ({start}) is after until ({end})"
        )));
    }
    DateRange::new(start, end)
}

/// Group digits of a count with thousands separators for display.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
