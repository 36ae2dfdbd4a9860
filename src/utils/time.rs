//! Time utilities: parsing `h:mm AM` times and 24h input.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub const TIME_FORMAT: &str = "%I:%M %p";

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), TIME_FORMAT).ok()
}

/// `h:mm AM`, without a leading zero on the hour.
pub fn format_time(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Accept `h:mm AM`/`h:mm pm` or 24h `HH:MM`, return `h:mm AM`.
pub fn normalize_time(input: &str) -> AppResult<String> {
    let s = input.trim().to_uppercase();
    parse_time(&s)
        .or_else(|| NaiveTime::parse_from_str(&s, "%H:%M").ok())
        .map(format_time)
        .ok_or_else(|| AppError::InvalidTime(input.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<String>> {
    match input {
        Some(s) => Ok(Some(normalize_time(s)?)),
        None => Ok(None),
    }
}
