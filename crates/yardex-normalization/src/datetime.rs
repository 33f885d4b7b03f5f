//! Date normalization for rule metadata.
//!
//! Dates in rule metadata come in every shape imaginable: `2021-03-05`,
//! `March 5, 2021`, `05.03.2021`, `200301`, `2021-03-05T10:22:00Z`,
//! `01 Jan 2020`, `2020/01`. Normalization happens in two steps:
//!
//! 1. [`rewrite_date`] rewrites the raw text into a slash-separated,
//!    month-first (or year-first) intermediate form.
//! 2. [`parse_calendar_date`] parses that form permissively.
//!
//! [`normalize_date`] runs both and formats the result as `YYYY-MM-DD`.
//! Anything unparseable yields `None`; nothing here returns an error.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Full month names, scanned in calendar order.
const LONG_MONTHS: [(&str, &str); 12] = [
    ("january", "01"),
    ("february", "02"),
    ("march", "03"),
    ("april", "04"),
    ("may", "05"),
    ("june", "06"),
    ("july", "07"),
    ("august", "08"),
    ("september", "09"),
    ("october", "10"),
    ("november", "11"),
    ("december", "12"),
];

const MEDIUM_MONTHS: [(&str, &str); 1] = [("sept", "09")];

const SHORT_MONTHS: [(&str, &str); 12] = [
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("may", "05"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

static REPEATED_SLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("/{2,}").expect("Invalid slash regex"));

/// Normalize a free-form date string to `YYYY-MM-DD`.
///
/// Returns `None` when the text cannot be read as a date.
pub fn normalize_date(raw: &str) -> Option<String> {
    let rewritten = rewrite_date(raw);
    if rewritten.is_empty() {
        return None;
    }
    parse_calendar_date(&rewritten).map(format_iso8601_date)
}

/// Rewrite a raw date string into the intermediate form fed to the parser.
///
/// Six-digit numeric input is reordered as groups `g3/g1/g2`; for example
/// `200301` becomes `01/20/03`. Day-first numeric dates (first field 13-31)
/// are swapped to month-first, and `MM/YYYY` becomes `YYYY/MM`.
pub fn rewrite_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let mut date = raw.to_string();

    // Drop the time of day.
    if date.len() > 10 && date.contains('T') && date.contains('Z') {
        if let Some((cut, _)) = date.char_indices().nth(10) {
            date.truncate(cut);
        }
    } else if let (Some(space), Some(colon)) = (date.find(' '), date.find(':'))
        && space > 0
        && colon > 0
    {
        date.truncate(space);
    }

    // Spaces, periods, hyphens and underscores become slashes.
    if date.matches(' ').count() == 2 {
        date = date.replace(' ', "/");
    }
    if date.matches('.').count() == 2 {
        date = date.replace('.', "/");
    }
    date = date.replace(['-', '_'], "/");

    if date.len() == 6 && date.bytes().all(|b| b.is_ascii_digit()) {
        return format!("{}/{}/{}", &date[4..], &date[..2], &date[2..4]);
    }

    let mut date = replace_month(&date.to_lowercase());
    date.retain(|c| c != ' ');
    // Upper-case again so any leftover `t`/`z` markers are recognizable.
    let date = date.to_uppercase();
    let date = REPEATED_SLASHES.replace_all(&date, "/").into_owned();

    let parts: Vec<&str> = date.split('/').collect();
    if let [first, second, third] = parts.as_slice()
        && let (Ok(month_or_day), Ok(_), Ok(_)) = (
            first.parse::<i64>(),
            second.parse::<i64>(),
            third.parse::<i64>(),
        )
    {
        if month_or_day > 12 && month_or_day < 32 {
            return format!("{second}/{first}/{third}");
        }
        return date;
    }
    if let [first, second] = parts.as_slice()
        && let Ok(month) = first.parse::<i64>()
        && month <= 12
    {
        return format!("{second}/{first}");
    }

    date.replace(",/", "/")
}

/// Substitute the first month name found, trying long names, then "sept",
/// then three-letter abbreviations. Only one table is ever applied.
fn replace_month(date: &str) -> String {
    for table in [&LONG_MONTHS[..], &MEDIUM_MONTHS[..], &SHORT_MONTHS[..]] {
        if let Some(replaced) = replace_month_name(date, table) {
            return replaced;
        }
    }
    date.to_string()
}

fn replace_month_name(date: &str, months: &[(&str, &str)]) -> Option<String> {
    for (name, number) in months {
        let Some(index) = date.find(name) else {
            continue;
        };
        let prefix = &date[..index];
        let suffix = &date[index + name.len()..];
        let replaced = if index == 0 {
            date.replace(name, &format!("{number}/"))
        } else if index > 4 {
            format!("{prefix}/{number}/{suffix}")
        } else {
            format!("{number}/{prefix}/{suffix}")
        };
        return Some(replaced);
    }
    None
}

/// Permissively parse a rewritten date string into a calendar date.
///
/// Accepts ISO dates, slash-separated month-first and year-first dates with
/// two- or four-digit years, compact `YYYYMMDD`, `YYYY/MM`, a bare year and
/// Unix timestamps in seconds or milliseconds. Any time of day is discarded.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_datetime(trimmed)
        .map(|dt| dt.date())
        .or_else(|| try_parse_date(trimmed))
        .or_else(|| try_parse_partial(trimmed))
        .or_else(|| try_parse_epoch(trimmed))
        .filter(|date| (0..=9999).contains(&date.year()))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%dT%H:%M:%S%.f",
        "%Y/%m/%dT%H:%M:%S",
        "%Y/%m/%dT%H:%M",
        "%m/%d/%YT%H:%M:%S",
        "%m/%d/%YT%H:%M",
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    // Two-digit years must be tried before four-digit ones; `%Y` would
    // otherwise read `03` as the year 3.
    let formats = [
        "%Y-%m-%d",
        "%m/%d/%y", // US short: 01/20/03
        "%m/%d/%Y", // US: 01/20/2003
        "%Y/%m/%d",
        "%Y%m%d", // Compact: 20030120
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Year-month and year-only values resolve to the first day of the period.
fn try_parse_partial(value: &str) -> Option<NaiveDate> {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if value.len() == 4 && is_digits(value) {
        let year = value.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    let (year, month) = value.split_once('/')?;
    if year.len() == 4 && is_digits(year) && (1..=2).contains(&month.len()) && is_digits(month) {
        return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1);
    }
    None
}

/// Ten digits are seconds since the Unix epoch, thirteen are milliseconds.
fn try_parse_epoch(value: &str) -> Option<NaiveDate> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let timestamp = match value.len() {
        10 => DateTime::from_timestamp(value.parse().ok()?, 0),
        13 => DateTime::from_timestamp_millis(value.parse().ok()?),
        _ => None,
    }?;
    Some(timestamp.date_naive())
}

/// Format a NaiveDate to ISO 8601 date string.
pub fn format_iso8601_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
