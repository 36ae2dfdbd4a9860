use crate::core::percent::verify_weight;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    category_exists, course_exists, insert_assignment, insert_category, insert_course,
    insert_event, insert_term, insert_type, load_gradebook, term_exists, type_course,
};
use crate::errors::{AppError, AppResult};
use crate::models::{Assignment, AssignmentType, Category, Course, Event, Term};
use crate::ui::messages::success;
use crate::utils::date::normalize_date;
use crate::utils::time::{normalize_time, parse_optional_time};

/// Input of `assignment add`, already split from the CLI arguments.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub name: String,
    pub course_id: i64,
    pub type_id: Option<i64>,
    pub due: String,
    pub time: Option<String>,
    pub priority: u8,
    pub comments: String,
}

/// Input of `event add`.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: bool,
    pub category_id: Option<i64>,
    pub location: String,
    pub description: String,
}

/// High-level business logic for the `add` subcommands.
pub struct AddLogic;

impl AddLogic {
    pub fn term(
        pool: &mut DbPool,
        name: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> AppResult<i64> {
        let start = start.map(normalize_date).transpose()?.unwrap_or_default();
        let end = end.map(normalize_date).transpose()?.unwrap_or_default();

        let term = Term::new(0, name, &start, &end);
        if term.ends_before_start() {
            return Err(term_range_error(&term));
        }

        let id = insert_term(&pool.conn, &term)?;
        ttlog(&pool.conn, "add", &format!("term {}", id), name)?;
        success(format!("Term #{} '{}' added.", id, name));
        Ok(id)
    }

    pub fn course(
        pool: &mut DbPool,
        name: &str,
        term_id: i64,
        number: &str,
        credits: u32,
    ) -> AppResult<i64> {
        if !term_exists(&pool.conn, term_id)? {
            return Err(AppError::NotFound {
                kind: "Term",
                id: term_id,
            });
        }

        let mut course = Course::new(0, term_id, name);
        course.number = number.trim().to_string();
        course.credits = credits;

        let id = insert_course(&pool.conn, &course)?;
        ttlog(
            &pool.conn,
            "add",
            &format!("course {}", id),
            &format!("{} (term {})", name, term_id),
        )?;
        success(format!("Course #{} '{}' added.", id, name));
        Ok(id)
    }

    /// Add an assignment type. A weight, if given, must keep the course's
    /// weights within 100%.
    pub fn assignment_type(
        pool: &mut DbPool,
        name: &str,
        course_id: i64,
        weight: Option<&str>,
    ) -> AppResult<i64> {
        if !course_exists(&pool.conn, course_id)? {
            return Err(AppError::NotFound {
                kind: "Course",
                id: course_id,
            });
        }

        let mut kind = AssignmentType::new(0, course_id, name);
        if let Some(w) = weight.filter(|w| !w.trim().is_empty()) {
            let book = load_gradebook(&pool.conn)?;
            let others = book.total_weight_except(course_id, None)?;
            kind.weight = verify_weight(w, others)?;
        }

        let id = insert_type(&pool.conn, &kind)?;
        ttlog(
            &pool.conn,
            "add",
            &format!("type {}", id),
            &format!("{} (course {}, weight '{}')", name, course_id, kind.weight),
        )?;
        success(format!("Assignment type #{} '{}' added.", id, name));
        Ok(id)
    }

    pub fn category(pool: &mut DbPool, name: &str, color: Option<&str>) -> AppResult<i64> {
        let mut category = Category::new(0, name);
        if let Some(c) = color {
            category.color =
                Category::normalize_color(c).ok_or_else(|| AppError::InvalidColor(c.into()))?;
        }

        let id = insert_category(&pool.conn, &category)?;
        ttlog(&pool.conn, "add", &format!("category {}", id), name)?;
        success(format!("Category #{} '{}' added.", id, name));
        Ok(id)
    }

    pub fn assignment(pool: &mut DbPool, input: &NewAssignment) -> AppResult<i64> {
        check_priority(input.priority)?;
        if !course_exists(&pool.conn, input.course_id)? {
            return Err(AppError::NotFound {
                kind: "Course",
                id: input.course_id,
            });
        }
        if let Some(type_id) = input.type_id {
            match type_course(&pool.conn, type_id)? {
                Some(owner) if owner == input.course_id => {}
                Some(owner) => {
                    return Err(AppError::TypeMismatch {
                        type_id,
                        owner,
                        course: input.course_id,
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

        let due = normalize_date(&input.due)?;
        let mut a = Assignment::new(0, &input.name, input.course_id, &due);
        a.type_id = input.type_id;
        a.priority = input.priority;
        a.comments = input.comments.clone();
        if let Some(t) = parse_optional_time(input.time.as_ref())? {
            a.due_time = t;
        }

        let id = insert_assignment(&pool.conn, &a)?;
        ttlog(
            &pool.conn,
            "add",
            &format!("assignment {}", id),
            &format!("{} due {} {}", a.name, a.due_date, a.due_time),
        )?;
        success(format!(
            "Assignment #{} '{}' added (due {} {}).",
            id, a.name, a.due_date, a.due_time
        ));
        Ok(id)
    }

    pub fn event(pool: &mut DbPool, input: &NewEvent) -> AppResult<i64> {
        if let Some(category_id) = input.category_id
            && !category_exists(&pool.conn, category_id)?
        {
            return Err(AppError::NotFound {
                kind: "Category",
                id: category_id,
            });
        }

        let day = normalize_date(&input.date)?;
        let mut ev = Event::new(0, &input.name, &day);
        ev.category_id = input.category_id;
        ev.all_day = input.all_day;
        ev.location = input.location.clone();
        ev.description = input.description.clone();

        if let Some(s) = &input.start {
            ev.start_time = normalize_time(s)?;
        }
        // an event without an explicit end lasts zero minutes
        ev.end_time = match &input.end {
            Some(e) => normalize_time(e)?,
            None => ev.start_time.clone(),
        };

        if ev.ends_before_start() {
            return Err(event_range_error(&ev));
        }

        let id = insert_event(&pool.conn, &ev)?;
        ttlog(
            &pool.conn,
            "add",
            &format!("event {}", id),
            &format!("{} on {} ({})", ev.name, ev.date, ev.time_label()),
        )?;
        success(format!("Event #{} '{}' added on {}.", id, ev.name, ev.date));
        Ok(id)
    }
}

pub(crate) fn term_range_error(term: &Term) -> AppError {
    AppError::InvalidRange(format!(
        "term ends on {} before it starts on {}",
        term.end_date, term.start_date
    ))
}

pub(crate) fn event_range_error(ev: &Event) -> AppError {
    AppError::InvalidRange(format!(
        "event ends at {} before it starts at {}",
        ev.end_time, ev.start_time
    ))
}

/// Priority must be 1..=5.
pub(crate) fn check_priority(priority: u8) -> AppResult<()> {
    if (1..=5).contains(&priority) {
        Ok(())
    } else {
        Err(AppError::InvalidPriority(priority))
    }
}
