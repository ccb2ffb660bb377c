//! Calendar arithmetic over the upstream API's 8-digit `YYYYMMDD` dates.
//!
//! Everything here is a pure function of an explicit reference date so
//! callers (and tests) control "today". Day counts are calendar-day
//! differences, not elapsed-hours division, so they are immune to DST
//! and time-of-day drift.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Postings whose deadline is within this many days count as "ending soon".
pub const ENDING_SOON_DAYS: i64 = 3;

/// Postings registered within this many days count as "new".
pub const NEW_POSTING_DAYS: i64 = 7;

/// Parse an 8-digit `YYYYMMDD` string. Anything else is `None`.
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").ok()
}

/// Signed day count from `today` to the end date: 0 = due today,
/// 1 = tomorrow, -1 = closed yesterday. `None` when the date is
/// missing or unparseable.
pub fn day_count(end_ymd: &str, today: NaiveDate) -> Option<i64> {
    parse_ymd(end_ymd).map(|end| (end - today).num_days())
}

/// Deadline within `ENDING_SOON_DAYS` days, inclusive, and not past.
pub fn is_ending_soon(end_ymd: &str, today: NaiveDate) -> bool {
    matches!(day_count(end_ymd, today), Some(d) if (0..=ENDING_SOON_DAYS).contains(&d))
}

/// Start date strictly after `now - NEW_POSTING_DAYS` days.
///
/// The start date is taken at local midnight, so a posting registered
/// exactly seven days ago stops counting as new at the same time of day.
pub fn is_new_posting(start_ymd: &str, now: NaiveDateTime) -> bool {
    match parse_ymd(start_ymd) {
        Some(start) => start.and_time(NaiveTime::MIN) > now - Duration::days(NEW_POSTING_DAYS),
        None => false,
    }
}

/// A posting with no usable end date is treated as perpetually open.
pub fn is_ongoing(end_ymd: &str, today: NaiveDate) -> bool {
    day_count(end_ymd, today).is_none_or(|d| d >= 0)
}

/// Display label for a deadline: `마감` once past, `D-DAY` on the day,
/// `D-{n}` before.
pub fn dday_label(end_ymd: &str, today: NaiveDate) -> String {
    match day_count(end_ymd, today) {
        None => String::new(),
        Some(d) if d < 0 => "마감".to_string(),
        Some(0) => "D-DAY".to_string(),
        Some(d) => format!("D-{d}"),
    }
}

/// `YYYYMMDD` → `yyyy.MM.dd` for display. Unparseable input is returned
/// unchanged.
pub fn format_ymd(ymd: &str) -> String {
    match parse_ymd(ymd) {
        Some(date) => date.format("%Y.%m.%d").to_string(),
        None => ymd.to_string(),
    }
}
