//! Presentation rows of the combined schedule.
//!
//! Rows are always re-projected from `Gradebook::items` after a sort, so the
//! list and what is shown can never drift apart.

use crate::models::{Gradebook, ListItem};
use serde::Serialize;
use std::collections::HashMap;

/// Display names of the entities a list item points to, keyed by id.
#[derive(Debug, Default, Clone)]
pub struct Labels {
    courses: HashMap<i64, String>,
    types: HashMap<i64, String>,
    categories: HashMap<i64, String>,
}

impl Labels {
    pub fn from_book(book: &Gradebook) -> Self {
        Self {
            courses: book.courses.iter().map(|c| (c.id, c.name.clone())).collect(),
            types: book.types.iter().map(|t| (t.id, t.name.clone())).collect(),
            categories: book
                .categories
                .iter()
                .map(|c| (c.id, c.name.clone()))
                .collect(),
        }
    }

    /// Assignment type name, or the event's category name. Empty if missing.
    pub fn kind_name(&self, item: &ListItem) -> String {
        let found = match item {
            ListItem::Assignment(a) => a.type_id.and_then(|id| self.types.get(&id)),
            ListItem::Event(e) => e.category_id.and_then(|id| self.categories.get(&id)),
        };
        found.cloned().unwrap_or_default()
    }

    /// Course name of an assignment; events have none.
    pub fn course_name(&self, item: &ListItem) -> String {
        match item {
            ListItem::Assignment(a) => self.courses.get(&a.course_id).cloned().unwrap_or_default(),
            ListItem::Event(_) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub id: i64,
    pub kind: &'static str,
    pub done: Option<bool>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_or_category: String,
    pub course: String,
    pub date: String,
    pub time: String,
    pub grade: String,
    pub priority: Option<u8>,
}

impl ScheduleRow {
    fn from_item(item: &ListItem, labels: &Labels) -> Self {
        let (kind, done, time, grade, priority) = match item {
            ListItem::Assignment(a) => (
                "assignment",
                Some(a.done),
                a.due_time.clone(),
                a.grade.clone(),
                Some(a.priority),
            ),
            ListItem::Event(e) => ("event", None, e.time_label(), String::new(), None),
        };

        Self {
            id: item.id(),
            kind,
            done,
            name: item.name().to_string(),
            type_or_category: labels.kind_name(item),
            course: labels.course_name(item),
            date: item.date().to_string(),
            time,
            grade,
            priority,
        }
    }
}

/// Rows in the current order of the combined list.
pub fn project(book: &Gradebook) -> Vec<ScheduleRow> {
    let labels = Labels::from_book(book);
    book.items
        .iter()
        .map(|item| ScheduleRow::from_item(item, &labels))
        .collect()
}
