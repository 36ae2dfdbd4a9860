//! Entry of the combined schedule: either an assignment or an event.

use super::{assignment::Assignment, event::Event};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListItem {
    Assignment(Assignment),
    Event(Event),
}

impl ListItem {
    pub fn id(&self) -> i64 {
        match self {
            ListItem::Assignment(a) => a.id,
            ListItem::Event(e) => e.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ListItem::Assignment(a) => &a.name,
            ListItem::Event(e) => &e.name,
        }
    }

    /// Due date of an assignment, or the date an event occurs on.
    pub fn date(&self) -> &str {
        match self {
            ListItem::Assignment(a) => &a.due_date,
            ListItem::Event(e) => &e.date,
        }
    }

    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            ListItem::Assignment(a) => Some(a),
            ListItem::Event(_) => None,
        }
    }
}
