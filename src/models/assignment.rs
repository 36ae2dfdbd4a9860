use crate::utils::date;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const DEFAULT_PRIORITY: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub id: i64,
    pub name: String,
    pub course_id: i64,
    pub type_id: Option<i64>,
    pub due_date: String, // "MM/DD/YYYY"
    pub due_time: String, // "h:mm AM"
    pub done: bool,
    pub grade: String, // formatted percentage, or empty
    pub priority: u8,
    pub comments: String,
}

impl Assignment {
    pub fn new(id: i64, name: &str, course_id: i64, due_date: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            course_id,
            type_id: None,
            due_date: due_date.to_string(),
            due_time: "12:00 PM".to_string(),
            done: false,
            grade: String::new(),
            priority: DEFAULT_PRIORITY,
            comments: String::new(),
        }
    }

    pub fn has_grade(&self) -> bool {
        !self.grade.trim().is_empty()
    }

    /// Numeric value of the grade with the `%` sign stripped.
    /// `None` when no grade is set, `Some(Err(_))` when the text is not a number.
    pub fn grade_value(&self) -> Option<Result<f64, std::num::ParseFloatError>> {
        if !self.has_grade() {
            return None;
        }
        Some(self.grade.replace('%', "").trim().parse::<f64>())
    }

    pub fn due_timestamp(&self) -> Option<NaiveDateTime> {
        date::parse_date_time(&self.due_date, &self.due_time)
    }
}
