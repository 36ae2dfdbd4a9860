use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_assignment, delete_category, delete_course, delete_event, delete_term, delete_type,
};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Term(i64),
    Course(i64),
    Type(i64),
    Category(i64),
    Assignment(i64),
    Event(i64),
}

impl DeleteTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            DeleteTarget::Term(_) => "Term",
            DeleteTarget::Course(_) => "Course",
            DeleteTarget::Type(_) => "Assignment type",
            DeleteTarget::Category(_) => "Category",
            DeleteTarget::Assignment(_) => "Assignment",
            DeleteTarget::Event(_) => "Event",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            DeleteTarget::Term(id)
            | DeleteTarget::Course(id)
            | DeleteTarget::Type(id)
            | DeleteTarget::Category(id)
            | DeleteTarget::Assignment(id)
            | DeleteTarget::Event(id) => *id,
        }
    }

    /// What else goes away (or is detached) with the target.
    pub fn cascade_note(&self) -> Option<&'static str> {
        match self {
            DeleteTarget::Term(_) => Some("Its courses, types and assignments are deleted too."),
            DeleteTarget::Course(_) => Some("Its types and assignments are deleted too."),
            DeleteTarget::Type(_) => Some("Its assignments are kept without a type."),
            DeleteTarget::Category(_) => Some("Its events are kept without a category."),
            DeleteTarget::Assignment(_) | DeleteTarget::Event(_) => None,
        }
    }
}

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn apply(pool: &mut DbPool, target: DeleteTarget) -> AppResult<()> {
        let conn = &pool.conn;
        let removed = match target {
            DeleteTarget::Term(id) => delete_term(conn, id)?,
            DeleteTarget::Course(id) => delete_course(conn, id)?,
            DeleteTarget::Type(id) => delete_type(conn, id)?,
            DeleteTarget::Category(id) => delete_category(conn, id)?,
            DeleteTarget::Assignment(id) => delete_assignment(conn, id)?,
            DeleteTarget::Event(id) => delete_event(conn, id)?,
        };

        if removed == 0 {
            return Err(AppError::NotFound {
                kind: target.kind(),
                id: target.id(),
            });
        }

        ttlog(
            conn,
            "del",
            &format!("{} {}", target.kind().to_lowercase(), target.id()),
            "deleted",
        )?;
        Ok(())
    }
}
