use serde::Serialize;

pub const DEFAULT_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String, // "#RRGGBB"
}

impl Category {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    /// Accepts `#RRGGBB` (case-insensitive) and returns it upper-cased.
    pub fn normalize_color(input: &str) -> Option<String> {
        let hex = input.trim().strip_prefix('#')?;
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(format!("#{}", hex.to_ascii_uppercase()))
        } else {
            None
        }
    }
}
