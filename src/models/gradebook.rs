//! In-memory repository of everything loaded from the database.
//!
//! The combined `items` list is the single source of truth for the schedule:
//! it is what the orderer sorts and what the presentation rows are projected
//! from.

use super::{
    assignment::Assignment, assignment_type::AssignmentType, category::Category, course::Course,
    event::Event, list_item::ListItem, term::Term,
};
use crate::core::percent;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Default, Clone)]
pub struct Gradebook {
    pub terms: Vec<Term>,
    pub courses: Vec<Course>,
    pub types: Vec<AssignmentType>,
    pub categories: Vec<Category>,
    pub items: Vec<ListItem>,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------
    // Lookups
    // ---------------------------

    pub fn term(&self, id: i64) -> Option<&Term> {
        self.terms.iter().find(|t| t.id == id)
    }

    pub fn course(&self, id: i64) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_mut(&mut self, id: i64) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.id == id)
    }

    pub fn assignment_type(&self, id: i64) -> Option<&AssignmentType> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn courses_in_term(&self, term_id: i64) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(move |c| c.term_id == term_id)
    }

    pub fn types_of(&self, course_id: i64) -> impl Iterator<Item = &AssignmentType> {
        self.types.iter().filter(move |t| t.course_id == course_id)
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.items.iter().filter_map(ListItem::as_assignment)
    }

    pub fn assignments_of(&self, course_id: i64) -> impl Iterator<Item = &Assignment> {
        self.assignments().filter(move |a| a.course_id == course_id)
    }

    pub fn assignment(&self, id: i64) -> Option<&Assignment> {
        self.assignments().find(|a| a.id == id)
    }

    pub fn event(&self, id: i64) -> Option<&Event> {
        self.items.iter().find_map(|item| match item {
            ListItem::Event(e) if e.id == id => Some(e),
            _ => None,
        })
    }

    fn assignment_mut(&mut self, id: i64) -> Option<&mut Assignment> {
        self.items.iter_mut().find_map(|item| match item {
            ListItem::Assignment(a) if a.id == id => Some(a),
            _ => None,
        })
    }

    /// Position of the item with the given id in the combined list.
    pub fn item_index(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    // ---------------------------
    // Mutations
    // ---------------------------

    pub fn remove_item(&mut self, id: i64) -> Option<ListItem> {
        let idx = self.item_index(id)?;
        Some(self.items.remove(idx))
    }

    /// Set the grade of an assignment from free text.
    ///
    /// Blank input clears the grade; anything else goes through
    /// [`percent::parse_percent`] and is stored in its formatted form.
    /// Returns the stored value and marks the owning course as changed.
    pub fn set_grade(&mut self, assignment_id: i64, input: &str) -> AppResult<String> {
        let formatted = if input.trim().is_empty() {
            String::new()
        } else {
            percent::parse_percent(input)?
        };

        let stored = formatted.clone();
        self.modify_assignment(assignment_id, |a| a.grade = stored)?;
        Ok(formatted)
    }

    /// Apply `change` to an assignment and mark its course as changed.
    pub fn modify_assignment<F>(&mut self, assignment_id: i64, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut Assignment),
    {
        let assignment = self.assignment_mut(assignment_id).ok_or(AppError::NotFound {
            kind: "Assignment",
            id: assignment_id,
        })?;
        change(assignment);
        let course_id = assignment.course_id;

        if let Some(course) = self.course_mut(course_id) {
            course.mark_changed();
        }
        Ok(())
    }

    pub fn set_done(&mut self, assignment_id: i64, done: bool) -> AppResult<()> {
        self.modify_assignment(assignment_id, |a| a.done = done)
    }

    /// Sum of the course's non-blank weights, excluding `except` (the type
    /// being edited). Expressed in percent.
    pub fn total_weight_except(&self, course_id: i64, except: Option<i64>) -> AppResult<f64> {
        let mut total = 0.0;
        for t in self.types_of(course_id) {
            if Some(t.id) == except || !t.has_weight() {
                continue;
            }
            total += t
                .weight_value()
                .map_err(|_| AppError::InvalidWeight(t.weight.clone()))?;
        }
        Ok(total)
    }

    /// Validate and store a new weight for an assignment type.
    /// Blank input makes the type unweighted.
    pub fn set_type_weight(&mut self, type_id: i64, input: &str) -> AppResult<String> {
        let course_id = self
            .assignment_type(type_id)
            .map(|t| t.course_id)
            .ok_or(AppError::NotFound {
                kind: "Assignment type",
                id: type_id,
            })?;

        let formatted = if input.trim().is_empty() {
            String::new()
        } else {
            let others = self.total_weight_except(course_id, Some(type_id))?;
            percent::verify_weight(input, others)?
        };

        if let Some(t) = self.types.iter_mut().find(|t| t.id == type_id) {
            t.weight = formatted.clone();
        }
        Ok(formatted)
    }

    /// Courses with modifications not yet written back.
    pub fn changed_courses(&self) -> Vec<i64> {
        self.courses
            .iter()
            .filter(|c| c.changed)
            .map(|c| c.id)
            .collect()
    }

    pub fn clear_changed(&mut self) {
        for c in &mut self.courses {
            c.changed = false;
        }
    }
}
