//! Date and time primitives for trip planning.
//!
//! Trips and activities carry their dates as `YYYY-MM-DD` strings and their
//! times as 24-hour `HH:MM` strings, matching the database column format.
//! This module provides the pure parsing, validation, comparison, and
//! formatting functions over those strings, backed by [`jiff::civil`] types.
//!
//! Every function here is a deterministic computation over its arguments.
//! Nothing raises: predicates return `false` on malformed input and
//! formatters return an empty string.

use std::cmp::Ordering;

use jiff::civil::{Date, Time};
use jiff::Zoned;

use crate::models::DateRange;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parses a date in strict `YYYY-MM-DD` format.
///
/// The string must be exactly ten characters with zero-padded components and
/// must denote a real calendar date: `"2024-02-30"`, `"2024-13-01"`, and
/// `"24-01-01"` are all rejected.
pub fn parse_date(s: &str) -> Option<Date> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !s
        .char_indices()
        .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
    {
        return None;
    }

    let year: i16 = s[0..4].parse().ok()?;
    let month: i8 = s[5..7].parse().ok()?;
    let day: i8 = s[8..10].parse().ok()?;

    Date::new(year, month, day).ok()
}

/// Parses a clock time in strict 24-hour `HH:MM` format.
pub fn parse_time(s: &str) -> Option<Time> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !s.char_indices().all(|(i, c)| i == 2 || c.is_ascii_digit()) {
        return None;
    }

    let hour: i8 = s[0..2].parse().ok()?;
    let minute: i8 = s[3..5].parse().ok()?;

    Time::new(hour, minute, 0, 0).ok()
}

/// True iff `s` is a well-formed `YYYY-MM-DD` string denoting a real date.
pub fn is_valid_date_string(s: &str) -> bool {
    parse_date(s).is_some()
}

/// True iff `s` is empty or a well-formed 24-hour `HH:MM` string.
///
/// The empty string is accepted because a time is always optional; an
/// activity without a time is valid.
pub fn is_valid_time_string(s: &str) -> bool {
    s.is_empty() || parse_time(s).is_some()
}

/// True iff both dates are valid and `start <= end`.
///
/// Note the non-strict comparison: a range may begin and end on the same
/// day. Trip validation separately enforces the stricter end-after-start
/// rule; the two checks are deliberately distinct.
pub fn is_valid_date_range(start: &str, end: &str) -> bool {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => s <= e,
        _ => false,
    }
}

/// True iff all three strings are valid dates and `date` falls within the
/// range, inclusive on both ends.
pub fn is_date_in_range(date: &str, range: &DateRange) -> bool {
    match (
        parse_date(date),
        parse_date(&range.start),
        parse_date(&range.end),
    ) {
        (Some(d), Some(start), Some(end)) => start <= d && d <= end,
        _ => false,
    }
}

/// Total-order comparison of two date strings.
///
/// Malformed dates sort before valid ones so that sorting never panics or
/// loses entries; callers should validate before relying on order.
pub fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Total-order comparison of two optional time strings.
///
/// An absent time sorts before any present time, so untimed activities lead
/// the day's listing.
pub fn compare_times(a: Option<&str>, b: Option<&str>) -> Ordering {
    let ta = a.filter(|s| !s.is_empty()).and_then(parse_time);
    let tb = b.filter(|s| !s.is_empty()).and_then(parse_time);

    match (ta, tb) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

/// Absolute number of whole days between two dates, 0 on malformed input.
pub fn days_between(start: &str, end: &str) -> i64 {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => i64::from((e - s).get_days()).abs(),
        _ => 0,
    }
}

/// All dates from `start` to `end` inclusive as `YYYY-MM-DD` strings.
///
/// Returns an empty vector if the pair is not a valid non-strict range.
pub fn dates_in_range(start: &str, end: &str) -> Vec<String> {
    let (Some(mut current), Some(end)) = (parse_date(start), parse_date(end)) else {
        return Vec::new();
    };
    if current > end {
        return Vec::new();
    }

    let mut dates = Vec::new();
    while current <= end {
        dates.push(format_date(current));
        match current.tomorrow() {
            Ok(next) => current = next,
            Err(_) => break,
        }
    }
    dates
}

/// Formats a civil date in database format (`YYYY-MM-DD`).
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// The current date in `YYYY-MM-DD` format, system timezone.
pub fn today() -> String {
    format_date(Zoned::now().date())
}

/// The current time in `HH:MM` format, system timezone.
pub fn current_time() -> String {
    let time = Zoned::now().time();
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// True iff the date string denotes today's date.
pub fn is_today(date: &str) -> bool {
    date == today()
}

/// True iff the date string is valid and strictly before today.
pub fn is_past_date(date: &str) -> bool {
    is_valid_date_string(date) && compare_dates(date, &today()) == Ordering::Less
}

/// True iff the date string is valid and strictly after today.
pub fn is_future_date(date: &str) -> bool {
    is_valid_date_string(date) && compare_dates(date, &today()) == Ordering::Greater
}

/// Formats a date string for human-readable display, e.g. "March 15, 2024".
///
/// Malformed input yields an empty string; display formatters carry no
/// validation responsibility and never raise.
pub fn format_date_for_display(date: &str) -> String {
    match parse_date(date) {
        Some(d) => format!(
            "{} {}, {}",
            MONTH_NAMES[d.month() as usize - 1],
            d.day(),
            d.year()
        ),
        None => String::new(),
    }
}

/// Formats a date string in short form, e.g. "Mar 15".
pub fn format_date_short(date: &str) -> String {
    match parse_date(date) {
        Some(d) => format!("{} {}", &MONTH_NAMES[d.month() as usize - 1][..3], d.day()),
        None => String::new(),
    }
}

/// Formats a 24-hour `HH:MM` time in 12-hour form, e.g. "2:30 PM".
///
/// Empty or malformed input yields an empty string.
pub fn format_time_for_display(time: &str) -> String {
    let Some(t) = parse_time(time) else {
        return String::new();
    };

    let (hour, meridiem) = match t.hour() {
        0 => (12, "AM"),
        h @ 1..=11 => (h, "AM"),
        12 => (12, "PM"),
        h => (h - 12, "PM"),
    };
    format!("{}:{:02} {}", hour, t.minute(), meridiem)
}

/// Formats a date relative to today, e.g. "Tomorrow" or "2 weeks ago".
///
/// Beyond 30 days in either direction the absolute display format is used.
pub fn format_relative_time(date: &str) -> String {
    format_relative_to(date, Zoned::now().date())
}

/// Relative-time formatting against an explicit reference date.
///
/// Bucket boundaries: same day, one day, under a week in days, under 30
/// days in weeks, then the absolute date.
pub fn format_relative_to(date: &str, reference: Date) -> String {
    let Some(d) = parse_date(date) else {
        return String::new();
    };

    let diff_days = i64::from((d - reference).get_days());
    match diff_days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        2..=6 => format!("In {diff_days} days"),
        -6..=-2 => format!("{} days ago", -diff_days),
        7..=29 => format!("In {} weeks", diff_days / 7),
        -29..=-7 => format!("{} weeks ago", -diff_days / 7),
        _ => format_date_for_display(date),
    }
}
