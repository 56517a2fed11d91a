// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lenient calendar-date parsing and the canonical `Www Mmm DD YYYY` form.
//!
//! Exercise dates are stored as whatever string the client supplied, so
//! everything that compares or displays them goes through [`parse_date`].
//! All dates are interpreted in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Rendered in place of a date that could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const CANONICAL_FORMAT: &str = "%a %b %d %Y";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const WEEKDAYS: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Parse a human-readable date into a UTC instant.
///
/// Returns `None` for anything unrecognized; callers treat that as a value
/// that compares false against every other date.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(date) = parse_partial_iso(s) {
        return Some(midnight(date));
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    let without_weekday = strip_weekday(s);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(without_weekday, format).ok())
        .map(midnight)
}

/// Render an instant in canonical form, e.g. `Sun Jan 15 2023`.
pub fn to_date_string(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format(CANONICAL_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Re-parse a stored date string and render it canonically.
pub fn canonicalize(raw: &str) -> String {
    to_date_string(parse_date(raw))
}

/// Today's date in canonical form.
pub fn today() -> String {
    to_date_string(Some(Utc::now()))
}

/// Milliseconds since the epoch, the unit dates are compared in.
pub fn timestamp_millis(raw: &str) -> Option<i64> {
    parse_date(raw).map(|dt| dt.timestamp_millis())
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// `YYYY` and `YYYY-MM`, which chrono will not parse into a full date.
fn parse_partial_iso(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match s.split_once('-') {
        None if s.len() == 4 && all_digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        Some((year, month))
            if year.len() == 4 && all_digits(year) && month.len() == 2 && all_digits(month) =>
        {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        _ => None,
    }
}

/// Drop a leading weekday name; it carries no information once the
/// calendar date is known.
fn strip_weekday(s: &str) -> &str {
    let Some((first, rest)) = s.split_once(' ') else {
        return s;
    };
    let prefix = first.trim_end_matches(',').get(..3);
    if WEEKDAYS
        .iter()
        .any(|day| prefix.is_some_and(|p| p.eq_ignore_ascii_case(day)))
    {
        rest.trim_start()
    } else {
        s
    }
}
