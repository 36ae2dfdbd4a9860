// src/export/logic.rs

use crate::config::Config;
use crate::core::diagnostics::DbLog;
use crate::core::grades::GradeAggregator;
use crate::core::orderer::{ListOrderer, SortDirection};
use crate::core::schedule::project;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_gradebook;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, GradeExport};
use crate::ui::messages::warning;
use crate::utils::path::resolve_destination;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the schedule (in the configured order) or, with `grades`,
    /// one row per course with its computed grade.
    ///
    /// Returns the written file, or `None` when there was nothing to export.
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        grades: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let path = resolve_destination(file)?;
        ensure_writable(&path, force)?;

        let mut book = load_gradebook(&pool.conn)?;
        let log = DbLog::new(&pool.conn);

        let (label, written) = if grades {
            let aggregator = GradeAggregator::new(&book, &log);
            let rows: Vec<GradeExport> = book
                .courses
                .iter()
                .map(|c| GradeExport::from_report(&book, c, &aggregator.course_report(c.id)))
                .collect();
            ("grades", write_rows(format, &rows, &path)?)
        } else {
            let orderer = ListOrderer::new(
                cfg.sort_key,
                SortDirection::from_ascending(cfg.sort_ascending),
            );
            orderer.sort(&mut book, None, &log);
            ("schedule", write_rows(format, &project(&book), &path)?)
        };

        if written == 0 {
            warning(format!("No {} rows found. Nothing to export.", label));
            return Ok(None);
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} {} rows as {}", written, label, format.as_str()),
        )?;
        Ok(Some(path))
    }
}

fn write_rows<T: Serialize>(format: ExportFormat, rows: &[T], path: &Path) -> AppResult<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }
    Ok(rows.len())
}
