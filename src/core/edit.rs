use crate::core::add::{check_priority, event_range_error, term_range_error};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    load_gradebook, save_changed, update_category, update_course, update_event, update_term,
    update_type_name, update_type_weight,
};
use crate::errors::{AppError, AppResult};
use crate::models::Category;
use crate::ui::messages::{info, success};
use crate::utils::date::normalize_date;
use crate::utils::time::{normalize_time, parse_optional_time};

/// Fields of a term to change; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TermEdit {
    pub name: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseEdit {
    pub name: Option<String>,
    pub number: Option<String>,
    pub credits: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryEdit {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentEdit {
    pub name: Option<String>,
    pub due: Option<String>,
    pub time: Option<String>,
    pub type_id: Option<i64>,
    pub priority: Option<u8>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EventEdit {
    pub name: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub category_id: Option<i64>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Names of the fields that are set, in declaration order.
fn changed_fields(fields: &[(&'static str, bool)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| *name)
        .collect()
}

fn require_changes(target: &str, fields: &[&str]) -> AppResult<()> {
    if fields.is_empty() {
        return Err(AppError::NothingToChange(target.to_string()));
    }
    Ok(())
}

/// Changes to existing entities.
///
/// Every change is validated against the in-memory
/// [`Gradebook`](crate::models::Gradebook); assignments are then written back
/// per changed course, other entities row by row.
pub struct EditLogic;

impl EditLogic {
    /// Store a free-text grade ("" clears it). Returns the stored form.
    pub fn grade(pool: &mut DbPool, assignment_id: i64, input: &str) -> AppResult<String> {
        let mut book = load_gradebook(&pool.conn)?;
        let stored = book.set_grade(assignment_id, input)?;
        save_changed(pool, &mut book)?;

        let target = format!("assignment {}", assignment_id);
        if stored.is_empty() {
            ttlog(&pool.conn, "grade", &target, "grade cleared")?;
            info(format!("Grade of assignment #{} cleared.", assignment_id));
        } else {
            ttlog(
                &pool.conn,
                "grade",
                &target,
                &format!("'{}' stored as {}", input.trim(), stored),
            )?;
            success(format!("Assignment #{} graded: {}", assignment_id, stored));
        }
        Ok(stored)
    }

    pub fn done(pool: &mut DbPool, assignment_id: i64, done: bool) -> AppResult<()> {
        let mut book = load_gradebook(&pool.conn)?;
        book.set_done(assignment_id, done)?;
        save_changed(pool, &mut book)?;

        let state = if done { "done" } else { "not done" };
        ttlog(
            &pool.conn,
            "edit",
            &format!("assignment {}", assignment_id),
            &format!("marked {}", state),
        )?;
        success(format!("Assignment #{} marked {}.", assignment_id, state));
        Ok(())
    }

    /// Validate a new type weight against the rest of the course and save it.
    pub fn weight(pool: &mut DbPool, type_id: i64, input: &str) -> AppResult<String> {
        let mut book = load_gradebook(&pool.conn)?;
        let stored = book.set_type_weight(type_id, input)?;
        update_type_weight(&pool.conn, type_id, &stored)?;

        let shown = if stored.is_empty() { "none" } else { stored.as_str() };
        ttlog(
            &pool.conn,
            "edit",
            &format!("type {}", type_id),
            &format!("weight set to {}", shown),
        )?;
        success(format!("Assignment type #{} weight: {}", type_id, shown));
        Ok(stored)
    }

    pub fn rename_type(pool: &mut DbPool, type_id: i64, name: &str) -> AppResult<()> {
        update_type_name(&pool.conn, type_id, name)?;
        ttlog(
            &pool.conn,
            "edit",
            &format!("type {}", type_id),
            &format!("renamed to '{}'", name),
        )?;
        success(format!("Assignment type #{} renamed to '{}'.", type_id, name));
        Ok(())
    }

    pub fn term(pool: &mut DbPool, term_id: i64, edit: &TermEdit) -> AppResult<()> {
        let fields = changed_fields(&[
            ("name", edit.name.is_some()),
            ("start", edit.start.is_some()),
            ("end", edit.end.is_some()),
        ]);
        require_changes(&format!("term #{}", term_id), &fields)?;

        let book = load_gradebook(&pool.conn)?;
        let mut term = book.term(term_id).cloned().ok_or(AppError::NotFound {
            kind: "Term",
            id: term_id,
        })?;

        if let Some(name) = &edit.name {
            term.name = name.clone();
        }
        if let Some(start) = &edit.start {
            term.start_date = normalize_date(start)?;
        }
        if let Some(end) = &edit.end {
            term.end_date = normalize_date(end)?;
        }
        if term.ends_before_start() {
            return Err(term_range_error(&term));
        }

        update_term(&pool.conn, &term)?;
        Self::log_update(pool, "term", term_id, &fields)?;
        success(format!("Term #{} updated.", term_id));
        Ok(())
    }

    pub fn course(pool: &mut DbPool, course_id: i64, edit: &CourseEdit) -> AppResult<()> {
        let fields = changed_fields(&[
            ("name", edit.name.is_some()),
            ("number", edit.number.is_some()),
            ("credits", edit.credits.is_some()),
        ]);
        require_changes(&format!("course #{}", course_id), &fields)?;

        let book = load_gradebook(&pool.conn)?;
        let mut course = book.course(course_id).cloned().ok_or(AppError::NotFound {
            kind: "Course",
            id: course_id,
        })?;

        if let Some(name) = &edit.name {
            course.name = name.clone();
        }
        if let Some(number) = &edit.number {
            course.number = number.trim().to_string();
        }
        if let Some(credits) = edit.credits {
            course.credits = credits;
        }

        update_course(&pool.conn, &course)?;
        Self::log_update(pool, "course", course_id, &fields)?;
        success(format!("Course #{} updated.", course_id));
        Ok(())
    }

    pub fn category(pool: &mut DbPool, category_id: i64, edit: &CategoryEdit) -> AppResult<()> {
        let fields = changed_fields(&[
            ("name", edit.name.is_some()),
            ("color", edit.color.is_some()),
        ]);
        require_changes(&format!("category #{}", category_id), &fields)?;

        let book = load_gradebook(&pool.conn)?;
        let mut category = book
            .category(category_id)
            .cloned()
            .ok_or(AppError::NotFound {
                kind: "Category",
                id: category_id,
            })?;

        if let Some(name) = &edit.name {
            category.name = name.clone();
        }
        if let Some(c) = &edit.color {
            category.color =
                Category::normalize_color(c).ok_or_else(|| AppError::InvalidColor(c.clone()))?;
        }

        update_category(&pool.conn, &category)?;
        Self::log_update(pool, "category", category_id, &fields)?;
        success(format!("Category #{} updated.", category_id));
        Ok(())
    }

    /// Change assignment details. A new type must belong to the assignment's
    /// course.
    pub fn assignment(
        pool: &mut DbPool,
        assignment_id: i64,
        edit: &AssignmentEdit,
    ) -> AppResult<()> {
        let fields = changed_fields(&[
            ("name", edit.name.is_some()),
            ("due", edit.due.is_some()),
            ("time", edit.time.is_some()),
            ("type", edit.type_id.is_some()),
            ("priority", edit.priority.is_some()),
            ("comments", edit.comments.is_some()),
        ]);
        require_changes(&format!("assignment #{}", assignment_id), &fields)?;

        let mut book = load_gradebook(&pool.conn)?;
        let course_id = book
            .assignment(assignment_id)
            .map(|a| a.course_id)
            .ok_or(AppError::NotFound {
                kind: "Assignment",
                id: assignment_id,
            })?;

        if let Some(p) = edit.priority {
            check_priority(p)?;
        }
        if let Some(type_id) = edit.type_id {
            match book.assignment_type(type_id) {
                Some(t) if t.course_id == course_id => {}
                Some(t) => {
                    return Err(AppError::TypeMismatch {
                        type_id,
                        owner: t.course_id,
                        course: course_id,
                    });
                }
                None => {
                    return Err(AppError::NotFound {
                        kind: "Assignment type",
                        id: type_id,
                    });
                }
            }
        }
        let due = edit.due.as_deref().map(normalize_date).transpose()?;
        let time = parse_optional_time(edit.time.as_ref())?;

        book.modify_assignment(assignment_id, |a| {
            if let Some(name) = &edit.name {
                a.name = name.clone();
            }
            if let Some(d) = due {
                a.due_date = d;
            }
            if let Some(t) = time {
                a.due_time = t;
            }
            if edit.type_id.is_some() {
                a.type_id = edit.type_id;
            }
            if let Some(p) = edit.priority {
                a.priority = p;
            }
            if let Some(c) = &edit.comments {
                a.comments = c.clone();
            }
        })?;
        save_changed(pool, &mut book)?;

        Self::log_update(pool, "assignment", assignment_id, &fields)?;
        success(format!("Assignment #{} updated.", assignment_id));
        Ok(())
    }

    pub fn event(pool: &mut DbPool, event_id: i64, edit: &EventEdit) -> AppResult<()> {
        let fields = changed_fields(&[
            ("name", edit.name.is_some()),
            ("date", edit.date.is_some()),
            ("start", edit.start.is_some()),
            ("end", edit.end.is_some()),
            ("category", edit.category_id.is_some()),
            ("location", edit.location.is_some()),
            ("description", edit.description.is_some()),
        ]);
        require_changes(&format!("event #{}", event_id), &fields)?;

        let book = load_gradebook(&pool.conn)?;
        let mut ev = book.event(event_id).cloned().ok_or(AppError::NotFound {
            kind: "Event",
            id: event_id,
        })?;

        if let Some(category_id) = edit.category_id {
            if book.category(category_id).is_none() {
                return Err(AppError::NotFound {
                    kind: "Category",
                    id: category_id,
                });
            }
            ev.category_id = Some(category_id);
        }
        if let Some(name) = &edit.name {
            ev.name = name.clone();
        }
        if let Some(d) = &edit.date {
            ev.set_date(&normalize_date(d)?);
        }
        if let Some(s) = &edit.start {
            ev.start_time = normalize_time(s)?;
        }
        if let Some(e) = &edit.end {
            ev.end_time = normalize_time(e)?;
        }
        if let Some(l) = &edit.location {
            ev.location = l.clone();
        }
        if let Some(d) = &edit.description {
            ev.description = d.clone();
        }
        if ev.ends_before_start() {
            return Err(event_range_error(&ev));
        }

        update_event(&pool.conn, &ev)?;
        Self::log_update(pool, "event", event_id, &fields)?;
        success(format!("Event #{} updated.", event_id));
        Ok(())
    }

    fn log_update(pool: &DbPool, kind: &str, id: i64, fields: &[&str]) -> AppResult<()> {
        ttlog(
            &pool.conn,
            "edit",
            &format!("{} {}", kind, id),
            &format!("updated {}", fields.join(", ")),
        )
    }
}
