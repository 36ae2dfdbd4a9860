//! Ordering of the combined assignment/event list.
//!
//! The list is sorted in place with repeated adjacent swaps until a pass
//! makes none. Values that fail to parse are reported once per sort and
//! leave the pair where it is, so the sort always terminates.

use crate::core::diagnostics::ErrorLog;
use crate::core::schedule::Labels;
use crate::errors::{AppError, AppResult};
use crate::models::{Gradebook, ListItem};
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Rank of events when sorting by grade.
const EVENT_GRADE_RANK: f64 = -2.0;
/// Rank of assignments without a usable grade.
const NO_GRADE_RANK: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Completion state: done assignments, pending assignments, events
    Done,
    Name,
    /// Assignment type or event category
    #[value(aliases = ["type", "category"])]
    Kind,
    Course,
    #[value(name = "due_date", aliases = ["due", "due-date"])]
    DueDate,
    Grade,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Done => "done",
            SortKey::Name => "name",
            SortKey::Kind => "kind",
            SortKey::Course => "course",
            SortKey::DueDate => "due_date",
            SortKey::Grade => "grade",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        <SortKey as ValueEnum>::from_str(s, true).map_err(|_| AppError::InvalidSortKey(s.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Ascending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOutcome {
    pub swaps: usize,
    /// New position of the previously selected item, if it is still listed.
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOrderer {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for ListOrderer {
    fn default() -> Self {
        Self {
            key: SortKey::DueDate,
            direction: SortDirection::Ascending,
        }
    }
}

impl ListOrderer {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort `book.items` and locate `selected_id` afterwards.
    pub fn sort(
        &self,
        book: &mut Gradebook,
        selected_id: Option<i64>,
        log: &dyn ErrorLog,
    ) -> SortOutcome {
        let labels = Labels::from_book(book);
        let swaps = self.sort_items(&mut book.items, &labels, log);
        let selected = selected_id.and_then(|id| book.item_index(id));
        SortOutcome { swaps, selected }
    }

    /// Bubble sort over `items`; returns the number of swaps performed.
    pub fn sort_items(&self, items: &mut [ListItem], labels: &Labels, log: &dyn ErrorLog) -> usize {
        let log = ReportOnce::new(log);
        let mut swaps = 0;
        let mut swapped = true;

        while swapped {
            swapped = false;
            for i in 0..items.len().saturating_sub(1) {
                if self.out_of_order(&items[i], &items[i + 1], labels, &log) {
                    items.swap(i, i + 1);
                    swaps += 1;
                    swapped = true;
                }
            }
        }

        swaps
    }

    /// True when `first` must move after `second` for the current direction.
    fn out_of_order(
        &self,
        first: &ListItem,
        second: &ListItem,
        labels: &Labels,
        log: &dyn ErrorLog,
    ) -> bool {
        let asc = self.direction.is_ascending();

        match self.key {
            SortKey::Done => {
                let (a, b) = (done_rank(first), done_rank(second));
                if asc { a > b } else { a < b }
            }
            SortKey::Name => text_out_of_order(asc, first.name(), second.name()),
            SortKey::Kind => {
                text_out_of_order(asc, &labels.kind_name(first), &labels.kind_name(second))
            }
            SortKey::Course => {
                text_out_of_order(asc, &labels.course_name(first), &labels.course_name(second))
            }
            SortKey::DueDate => {
                let (Some(a), Some(b)) = (due_of(first, log), due_of(second, log)) else {
                    return false;
                };
                match a.cmp(&b) {
                    Ordering::Greater => asc,
                    Ordering::Less => !asc,
                    // same instant: assignment before event when ascending,
                    // event before assignment when descending
                    Ordering::Equal => match (first, second) {
                        (ListItem::Event(_), ListItem::Assignment(_)) => asc,
                        (ListItem::Assignment(_), ListItem::Event(_)) => !asc,
                        _ => false,
                    },
                }
            }
            SortKey::Grade => {
                let (a, b) = (grade_rank(first, log), grade_rank(second, log));
                if asc { a > b } else { a < b }
            }
        }
    }
}

/// Forwards the first report for each target and drops the repeats that
/// every later comparison of the same item would produce.
struct ReportOnce<'a> {
    inner: &'a dyn ErrorLog,
    seen: RefCell<HashSet<String>>,
}

impl<'a> ReportOnce<'a> {
    fn new(inner: &'a dyn ErrorLog) -> Self {
        Self {
            inner,
            seen: RefCell::new(HashSet::new()),
        }
    }
}

impl ErrorLog for ReportOnce<'_> {
    fn report(&self, target: &str, message: &str) {
        if self.seen.borrow_mut().insert(target.to_string()) {
            self.inner.report(target, message);
        }
    }
}

fn done_rank(item: &ListItem) -> u8 {
    match item {
        ListItem::Assignment(a) if a.done => 0,
        ListItem::Assignment(_) => 1,
        ListItem::Event(_) => 2,
    }
}

/// Case-insensitive comparison of two labels.
fn text_out_of_order(asc: bool, first: &str, second: &str) -> bool {
    let ord = second.to_lowercase().cmp(&first.to_lowercase());
    if asc {
        ord == Ordering::Less
    } else {
        ord == Ordering::Greater
    }
}

fn due_of(item: &ListItem, log: &dyn ErrorLog) -> Option<NaiveDateTime> {
    let (parsed, date, time) = match item {
        ListItem::Assignment(a) => (a.due_timestamp(), &a.due_date, a.due_time.as_str()),
        ListItem::Event(e) => (e.start_timestamp(), &e.date, e.effective_start()),
    };

    if parsed.is_none() {
        log.report(
            &format!("item {}", item.id()),
            &format!("unparseable date '{} {}'", date, time),
        );
    }
    parsed
}

fn grade_rank(item: &ListItem, log: &dyn ErrorLog) -> f64 {
    let ListItem::Assignment(a) = item else {
        return EVENT_GRADE_RANK;
    };

    match a.grade_value() {
        None => NO_GRADE_RANK,
        Some(Ok(g)) if g.is_finite() => g,
        Some(_) => {
            log.report(
                &format!("assignment {}", a.id),
                &format!("unparseable grade '{}'", a.grade),
            );
            NO_GRADE_RANK
        }
    }
}
