//! Date utilities. Dates are kept as text in `MM/DD/YYYY` form
//! and only parsed when a computation needs them.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%m/%d/%Y";
pub const DATE_TIME_FORMAT: &str = "%m/%d/%Y %I:%M %p";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Combine a `MM/DD/YYYY` date and an `h:mm AM` time.
pub fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let joined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&joined, DATE_TIME_FORMAT).ok()
}

/// Validate user input and return it in canonical `MM/DD/YYYY` form.
/// Also accepts ISO `YYYY-MM-DD` and the keyword `today`.
pub fn normalize_date(input: &str) -> AppResult<String> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("today") {
        return Ok(format_date(today()));
    }

    parse_date(s)
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .map(format_date)
        .ok_or_else(|| AppError::InvalidDate(input.to_string()))
}
