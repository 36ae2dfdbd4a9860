use crate::utils::date;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Term {
    pub id: i64,
    pub name: String,
    pub start_date: String, // "MM/DD/YYYY"
    pub end_date: String,
}

impl Term {
    pub fn new(id: i64, name: &str, start_date: &str, end_date: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    /// True when both dates parse and the term ends before it starts.
    pub fn ends_before_start(&self) -> bool {
        matches!(
            (date::parse_date(&self.start_date), date::parse_date(&self.end_date)),
            (Some(s), Some(e)) if e < s
        )
    }
}
