// src/export/model.rs

use crate::core::grades::CourseReport;
use crate::core::percent::format_percent;
use crate::models::{Course, Gradebook};
use serde::Serialize;

/// One line of the grade export.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GradeExport {
    pub course_id: i64,
    pub course: String,
    pub number: String,
    pub term: String,
    pub credits: u32,
    /// Formatted percentage, empty when the course has no grade yet.
    pub grade: String,
    pub graded_assignments: usize,
}

impl GradeExport {
    pub(crate) fn from_report(book: &Gradebook, course: &Course, report: &CourseReport) -> Self {
        Self {
            course_id: course.id,
            course: course.name.clone(),
            number: course.number.clone(),
            term: book
                .term(course.term_id)
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            credits: course.credits,
            grade: report.grade.map(format_percent).unwrap_or_default(),
            graded_assignments: report.tallies.iter().map(|t| t.count).sum(),
        }
    }
}
