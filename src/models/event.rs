use crate::utils::date;
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

/// Start time used for all-day events when ordering by date.
pub const ALL_DAY_START: &str = "12:00 AM";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub event_year: i32,           // ⇔ events.event_year (derived from date)
    pub category_id: Option<i64>,  // ⇔ events.category_id (NULL = no category)
    pub date: String,              // ⇔ events.date (TEXT "MM/DD/YYYY")
    pub start_time: String,        // ⇔ events.start_time (TEXT "h:mm AM")
    pub end_time: String,          // ⇔ events.end_time
    pub all_day: bool,
    pub location: String,
    pub description: String,
}

impl Event {
    /// Build an event from CLI input.
    /// - `event_year` is taken from the date, or the current year if the date
    ///   does not parse
    /// - start and end default to 12:00 PM, like a freshly created event
    pub fn new(id: i64, name: &str, date: &str) -> Self {
        let event_year = date::parse_date(date)
            .map(|d| d.year())
            .unwrap_or_else(|| date::today().year());

        Self {
            id,
            name: name.to_string(),
            event_year,
            category_id: None,
            date: date.to_string(),
            start_time: "12:00 PM".to_string(),
            end_time: "12:00 PM".to_string(),
            all_day: false,
            location: String::new(),
            description: String::new(),
        }
    }

    /// Move the event to another day, keeping `event_year` in step.
    pub fn set_date(&mut self, date: &str) {
        if let Some(d) = date::parse_date(date) {
            self.event_year = d.year();
        }
        self.date = date.to_string();
    }

    /// All-day events never end early; otherwise compare start and end on
    /// the event's day.
    pub fn ends_before_start(&self) -> bool {
        if self.all_day {
            return false;
        }
        matches!(
            (
                date::parse_date_time(&self.date, &self.start_time),
                date::parse_date_time(&self.date, &self.end_time),
            ),
            (Some(s), Some(e)) if e < s
        )
    }

    /// Start time used for ordering: midnight for all-day events.
    pub fn effective_start(&self) -> &str {
        if self.all_day {
            ALL_DAY_START
        } else {
            &self.start_time
        }
    }

    pub fn start_timestamp(&self) -> Option<NaiveDateTime> {
        date::parse_date_time(&self.date, self.effective_start())
    }

    /// Time column as shown in the schedule.
    pub fn time_label(&self) -> String {
        if self.all_day {
            "all day".to_string()
        } else {
            format!("{} - {}", self.start_time, self.end_time)
        }
    }
}
