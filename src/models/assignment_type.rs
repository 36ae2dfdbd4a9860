use serde::Serialize;
use std::num::ParseFloatError;

/// A weighted grading category of a course ("Homework", "Exams", ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentType {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    /// Percentage string such as "40%", or empty when the type is unweighted.
    pub weight: String,
}

impl AssignmentType {
    pub fn new(id: i64, course_id: i64, name: &str) -> Self {
        Self {
            id,
            course_id,
            name: name.to_string(),
            weight: String::new(),
        }
    }

    pub fn has_weight(&self) -> bool {
        !self.weight.trim().is_empty()
    }

    pub fn weight_value(&self) -> Result<f64, ParseFloatError> {
        self.weight.replace('%', "").trim().parse::<f64>()
    }
}
