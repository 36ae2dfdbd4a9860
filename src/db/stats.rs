use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

const COUNTED_TABLES: &[(&str, &str)] = &[
    ("terms", "Terms"),
    ("courses", "Courses"),
    ("assignment_types", "Assignment types"),
    ("assignments", "Assignments"),
    ("categories", "Categories"),
    ("events", "Events"),
    ("log", "Log rows"),
];

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (table, label) in COUNTED_TABLES {
        let count: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) LAST MIGRATION
    //
    let last_migration: Option<String> = pool
        .conn
        .query_row(
            "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_migration = last_migration.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Last migration:{} {}", CYAN, RESET, fmt_migration);
    println!();

    Ok(())
}
