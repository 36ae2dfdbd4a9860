//! Weighted grade computation for courses and terms.
//!
//! A course grade is the weighted mean of its assignment types: each type
//! contributes its running grade times its weight, and the sum is divided
//! by the weights actually in use. Types without a weight and assignments
//! without a type do not count.
//!
//! A type's running grade starts at its first graded assignment and then
//! halves the distance to each later one, `grade = (grade + next) / 2`, in
//! assignment order. Later grades therefore weigh more than earlier ones.

use crate::core::diagnostics::ErrorLog;
use crate::models::Gradebook;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One graded assignment, as plotted on the grade history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRecord {
    pub assignment_id: i64,
    pub type_id: i64,
    pub grade: f64,
    pub due: NaiveDateTime,
}

/// Running grade of one assignment type during an aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeTally {
    pub type_id: i64,
    pub name: String,
    pub weight: f64,
    pub grade: f64,
    pub count: usize,
}

impl TypeTally {
    fn new(type_id: i64, name: &str, weight: f64, first: f64) -> Self {
        Self {
            type_id,
            name: name.to_string(),
            weight,
            grade: first,
            count: 1,
        }
    }

    pub fn add_grade(&mut self, next: f64) {
        self.grade = (self.grade + next) / 2.0;
        self.count += 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourseReport {
    pub course_id: i64,
    /// `None` when no grade can be computed ("no grade", not 0%).
    pub grade: Option<f64>,
    pub tallies: Vec<TypeTally>,
    /// Sorted by due date, oldest first.
    pub records: Vec<GradeRecord>,
}

pub struct GradeAggregator<'a> {
    book: &'a Gradebook,
    log: &'a dyn ErrorLog,
}

impl<'a> GradeAggregator<'a> {
    pub fn new(book: &'a Gradebook, log: &'a dyn ErrorLog) -> Self {
        Self { book, log }
    }

    pub fn course_grade(&self, course_id: i64) -> Option<f64> {
        self.course_report(course_id).grade
    }

    /// Grade of a course with its per-type breakdown.
    ///
    /// Tallies are rebuilt from scratch on every call. A grade or weight that
    /// does not parse voids the whole result; a due date that does not parse
    /// only drops that assignment from `records`.
    pub fn course_report(&self, course_id: i64) -> CourseReport {
        match self.aggregate(course_id) {
            Ok(report) => report,
            Err(message) => {
                self.log.report(&format!("course {}", course_id), &message);
                CourseReport {
                    course_id,
                    ..Default::default()
                }
            }
        }
    }

    fn aggregate(&self, course_id: i64) -> Result<CourseReport, String> {
        let mut tallies: Vec<TypeTally> = Vec::new();
        let mut records = Vec::new();

        for a in self.book.assignments_of(course_id) {
            if !a.done || !a.has_grade() {
                continue;
            }
            let Some(kind) = a.type_id.and_then(|id| self.book.assignment_type(id)) else {
                continue;
            };
            if !kind.has_weight() {
                continue;
            }

            let grade = match a.grade_value() {
                Some(Ok(g)) => g,
                _ => {
                    return Err(format!(
                        "assignment {} has an unparseable grade '{}'",
                        a.id, a.grade
                    ));
                }
            };
            let weight = kind.weight_value().map_err(|_| {
                format!(
                    "assignment type {} has an unparseable weight '{}'",
                    kind.id, kind.weight
                )
            })?;

            match tallies.iter_mut().find(|t| t.type_id == kind.id) {
                Some(tally) => tally.add_grade(grade),
                None => tallies.push(TypeTally::new(kind.id, &kind.name, weight, grade)),
            }

            match a.due_timestamp() {
                Some(due) => records.push(GradeRecord {
                    assignment_id: a.id,
                    type_id: kind.id,
                    grade,
                    due,
                }),
                None => self.log.report(
                    &format!("assignment {}", a.id),
                    &format!("unparseable due date '{} {}'", a.due_date, a.due_time),
                ),
            }
        }

        // stable: same due date keeps assignment order
        records.sort_by_key(|r| r.due);

        let weighted: f64 = tallies.iter().map(|t| t.grade * t.weight).sum();
        let weights: f64 = tallies.iter().map(|t| t.weight).sum();
        let overall = weighted / weights;

        Ok(CourseReport {
            course_id,
            grade: (overall.is_finite() && overall >= 0.0).then_some(overall),
            tallies,
            records,
        })
    }

    /// Mean of the term's course grades. Courses without a grade are left
    /// out of both sum and count; `None` if no course has one.
    pub fn term_grade(&self, term_id: i64) -> Option<f64> {
        let reports: Vec<CourseReport> = self
            .book
            .courses_in_term(term_id)
            .map(|c| self.course_report(c.id))
            .collect();
        Self::term_grade_from(&reports)
    }

    /// Term mean over reports already computed, without aggregating (or
    /// reporting failures) again.
    pub fn term_grade_from(reports: &[CourseReport]) -> Option<f64> {
        let grades: Vec<f64> = reports.iter().filter_map(|r| r.grade).collect();

        if grades.is_empty() {
            return None;
        }
        Some(grades.iter().sum::<f64>() / grades.len() as f64)
    }
}
