//! Free-text grade and weight parsing.
//!
//! Grades are typed by hand ("85", "42.5%", "3/4", "7 out of 8") and stored
//! in a canonical percentage form with two decimals, where a `.00` fraction
//! is dropped: "85%", "85.50%", "66.67%".

use crate::errors::{AppError, AppResult};

/// Tolerance used when checking that weights stay within 100%.
const WEIGHT_EPSILON: f64 = 1e-9;

/// Format a percentage value (`85.5` means 85.5%).
pub fn format_percent(value: f64) -> String {
    let s = format!("{:.2}", value);
    match s.split_once('.') {
        Some((int, "00")) => format!("{int}%"),
        _ => format!("{s}%"),
    }
}

/// Parse a finite number; `inf`/`NaN` spellings are rejected.
fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split on `sep`, dropping trailing empty parts ("3/4/" has two parts).
fn split_parts<'a>(s: &'a str, sep: &str) -> Vec<&'a str> {
    let mut parts: Vec<&str> = s.split(sep).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

/// `numerator / denominator` as a percentage; "0%" when the numerator is zero.
fn ratio(numerator: &str, denominator: &str) -> Option<String> {
    let a = parse_number(numerator)?;
    if a == 0.0 {
        return Some("0%".to_string());
    }
    let b = parse_number(denominator)?;
    let value = a / b * 100.0;
    value.is_finite().then(|| format_percent(value))
}

fn parse_percent_inner(s: &str) -> Option<String> {
    // bare number
    if let Some(value) = parse_number(s) {
        if value == 0.0 {
            return Some("0%".to_string());
        }
        return Some(format_percent(value));
    }

    // already a percentage
    if s.ends_with('%') {
        return parse_number(&s.replace('%', "")).map(format_percent);
    }

    // proper division
    if s.contains('/') {
        let parts = split_parts(s, "/");
        if parts.len() != 2 {
            return None;
        }
        return ratio(parts[0], parts[1]);
    }

    // worded division: "A of B" / "A out of B"
    if s.contains("of") {
        let parts = split_parts(s, "of");
        if parts.len() != 2 {
            return None;
        }
        let numerator = match parts[0].find("out") {
            Some(idx) => &parts[0][..idx],
            None => parts[0],
        };
        return ratio(numerator, parts[1]);
    }

    None
}

/// Interpret a free-text grade.
///
/// Whitespace is ignored. Returns `AppError::InvalidGrade` when the text is
/// none of: a number, a number with `%`, `A/B`, `A of B`, `A out of B`.
pub fn parse_percent(input: &str) -> AppResult<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    parse_percent_inner(&compact).ok_or_else(|| AppError::InvalidGrade(input.to_string()))
}

/// Numeric value of an already formatted percentage ("85.50%" → 85.5).
pub fn percent_value(formatted: &str) -> Option<f64> {
    parse_number(formatted.replace('%', "").trim())
}

/// Validate a weight for an assignment type.
///
/// `others_total` is the sum (in percent) of the other weights of the same
/// course. The weight is parsed like a grade and must keep the course total
/// within 100%.
pub fn verify_weight(input: &str, others_total: f64) -> AppResult<String> {
    let formatted = parse_percent(input).map_err(|_| AppError::InvalidWeight(input.to_string()))?;
    let value =
        percent_value(&formatted).ok_or_else(|| AppError::InvalidWeight(input.to_string()))?;

    if value < 0.0 {
        return Err(AppError::InvalidWeight(input.to_string()));
    }

    let total = others_total + value;
    if total > 100.0 + WEIGHT_EPSILON {
        return Err(AppError::WeightOverflow(format_percent(total)));
    }

    Ok(format_percent(value))
}

/// Total of a course's weights as displayed next to its grading scale.
/// Values above 100 are shown as 100.
pub fn capped_total(total: f64) -> f64 {
    total.min(100.0)
}
