//! Formatting utilities used for CLI and export outputs.

/// Numeric grade as shown in reports: `87.5` → "87.50%", `90.0` → "90%".
pub fn grade2readable(grade: Option<f64>) -> String {
    match grade {
        Some(g) => crate::core::percent::format_percent(g),
        None => "--".to_string(),
    }
}

/// Check mark for assignments, blank for events.
pub fn done_mark(done: Option<bool>) -> &'static str {
    match done {
        Some(true) => "✔",
        Some(false) => "·",
        None => " ",
    }
}

pub fn priority_label(priority: u8) -> &'static str {
    match priority {
        1 => "lowest",
        2 => "low",
        3 => "normal",
        4 => "high",
        5 => "highest",
        _ => "?",
    }
}
