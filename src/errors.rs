//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected MM/DD/YYYY)")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected h:mm AM/PM)")]
    InvalidTime(String),

    #[error("Invalid grade: {0}")]
    InvalidGrade(String),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("Invalid color: {0} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Destination must be an absolute path: {0}")]
    InvalidPath(String),

    #[error("Invalid backup: {0}")]
    InvalidBackup(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Assignment type weights would total {0}, which exceeds 100%")]
    WeightOverflow(String),

    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Priority must be between 1 and 5, got {0}")]
    InvalidPriority(u8),

    #[error("Assignment type #{type_id} belongs to course #{owner}, not #{course}")]
    TypeMismatch { type_id: i64, owner: i64, course: i64 },

    #[error("Nothing to change for {0}: pass at least one field option")]
    NothingToChange(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
