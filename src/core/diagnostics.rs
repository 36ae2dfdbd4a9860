//! Error reporting for the grade aggregator and the list orderer.
//!
//! Parse failures inside those computations never reach the caller: they
//! are reported here and the computation carries on. The sink is passed in
//! explicitly so the CLI can persist reports in the `log` table while tests
//! inspect them in memory.

use crate::db::log::ttlog;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::cell::RefCell;

/// Operation name used for every report written by the core.
pub const PARSE_ERROR: &str = "parse_error";

pub trait ErrorLog {
    /// `target` identifies what failed to parse (e.g. "assignment 42"),
    /// `message` says what was wrong with it.
    fn report(&self, target: &str, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub target: String,
    pub message: String,
}

/// Collects reports in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ErrorLog for MemoryLog {
    fn report(&self, target: &str, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            target: target.to_string(),
            message: message.to_string(),
        });
    }
}

/// Writes reports to the internal `log` table.
pub struct DbLog<'c> {
    conn: &'c Connection,
}

impl<'c> DbLog<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl ErrorLog for DbLog<'_> {
    fn report(&self, target: &str, message: &str) {
        // non bloccante: a failed log write must not abort a sort
        if let Err(e) = ttlog(self.conn, PARSE_ERROR, target, message) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
}
