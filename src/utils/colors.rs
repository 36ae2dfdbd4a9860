/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grade color:
/// \>= 90 → green
/// \< 60 → red
/// none → grey
pub fn color_for_grade(grade: Option<f64>) -> &'static str {
    match grade {
        None => GREY,
        Some(g) if g >= 90.0 => GREEN,
        Some(g) if g < 60.0 => RED,
        Some(_) => RESET,
    }
}

pub fn colorize_grade(grade: Option<f64>, text: &str) -> String {
    format!("{}{}{}", color_for_grade(grade), text, RESET)
}
