//! Schema migrations.
//!
//! Each migration runs once; applied versions are recorded in the `log`
//! table as `migration_applied` rows whose target is the version name.

use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_schema",
        description: "Created terms, courses, types, categories, assignments and events",
        sql: r#"
        CREATE TABLE IF NOT EXISTS item_ids (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS terms (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS courses (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            term_id     INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            number      TEXT NOT NULL DEFAULT '',
            credits     INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS assignment_types (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id   INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            weight      TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS categories (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            color       TEXT NOT NULL DEFAULT '#000000'
        );

        CREATE TABLE IF NOT EXISTS assignments (
            id          INTEGER PRIMARY KEY,
            course_id   INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            type_id     INTEGER REFERENCES assignment_types(id) ON DELETE SET NULL,
            name        TEXT NOT NULL,
            due_date    TEXT NOT NULL,
            due_time    TEXT NOT NULL DEFAULT '12:00 PM',
            done        INTEGER NOT NULL DEFAULT 0,
            grade       TEXT NOT NULL DEFAULT '',
            priority    INTEGER NOT NULL DEFAULT 3 CHECK(priority BETWEEN 1 AND 5),
            comments    TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS events (
            id           INTEGER PRIMARY KEY,
            category_id  INTEGER REFERENCES categories(id) ON DELETE SET NULL,
            name         TEXT NOT NULL,
            event_year   INTEGER NOT NULL,
            date         TEXT NOT NULL,
            start_time   TEXT NOT NULL DEFAULT '12:00 PM',
            end_time     TEXT NOT NULL DEFAULT '12:00 PM',
            all_day      INTEGER NOT NULL DEFAULT 0,
            location     TEXT NOT NULL DEFAULT '',
            description  TEXT NOT NULL DEFAULT ''
        );
        "#,
    },
    Migration {
        version: "20250318_0002_add_lookup_indexes",
        description: "Added indexes on assignments, assignment types and events",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_assignments_course ON assignments(course_id);
        CREATE INDEX IF NOT EXISTS idx_types_course ON assignment_types(course_id);
        CREATE INDEX IF NOT EXISTS idx_events_year ON events(event_year);
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()
}

/// Public entry point: run all pending migrations, returning how many ran.
///
/// Invocata da db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}

/// Names of the migrations not yet applied.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}
