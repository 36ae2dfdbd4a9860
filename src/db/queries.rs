use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Assignment, AssignmentType, Category, Course, Event, Gradebook, ListItem, Term,
};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------
// Row mapping
// ---------------------------

fn map_term(row: &Row) -> Result<Term> {
    Ok(Term {
        id: row.get("id")?,
        name: row.get("name")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
    })
}

fn map_course(row: &Row) -> Result<Course> {
    Ok(Course {
        id: row.get("id")?,
        term_id: row.get("term_id")?,
        name: row.get("name")?,
        number: row.get("number")?,
        credits: row.get("credits")?,
        changed: false,
    })
}

fn map_type(row: &Row) -> Result<AssignmentType> {
    Ok(AssignmentType {
        id: row.get("id")?,
        course_id: row.get("course_id")?,
        name: row.get("name")?,
        weight: row.get("weight")?,
    })
}

fn map_category(row: &Row) -> Result<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
        color: row.get("color")?,
    })
}

pub fn map_assignment(row: &Row) -> Result<Assignment> {
    Ok(Assignment {
        id: row.get("id")?,
        name: row.get("name")?,
        course_id: row.get("course_id")?,
        type_id: row.get("type_id")?,
        due_date: row.get("due_date")?,
        due_time: row.get("due_time")?,
        done: row.get::<_, i32>("done")? == 1,
        grade: row.get("grade")?,
        priority: row.get("priority")?,
        comments: row.get("comments")?,
    })
}

pub fn map_event(row: &Row) -> Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        name: row.get("name")?,
        event_year: row.get("event_year")?,
        category_id: row.get("category_id")?,
        date: row.get("date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        all_day: row.get::<_, i32>("all_day")? == 1,
        location: row.get("location")?,
        description: row.get("description")?,
    })
}

fn query_all<T>(
    conn: &Connection,
    sql: &str,
    f: impl FnMut(&Row) -> Result<T>,
) -> AppResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], f)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Loading
// ---------------------------

/// Load every entity. The combined list comes back in creation order
/// (item ids are allocated from one sequence for both kinds).
pub fn load_gradebook(conn: &Connection) -> AppResult<Gradebook> {
    let terms = query_all(conn, "SELECT * FROM terms ORDER BY id", map_term)?;
    let courses = query_all(conn, "SELECT * FROM courses ORDER BY id", map_course)?;
    let types = query_all(conn, "SELECT * FROM assignment_types ORDER BY id", map_type)?;
    let categories = query_all(conn, "SELECT * FROM categories ORDER BY id", map_category)?;
    let assignments = query_all(conn, "SELECT * FROM assignments ORDER BY id", map_assignment)?;
    let events = query_all(conn, "SELECT * FROM events ORDER BY id", map_event)?;

    let mut items: Vec<ListItem> = assignments
        .into_iter()
        .map(ListItem::Assignment)
        .chain(events.into_iter().map(ListItem::Event))
        .collect();
    items.sort_by_key(ListItem::id);

    Ok(Gradebook {
        terms,
        courses,
        types,
        categories,
        items,
    })
}

pub fn term_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    exists(conn, "SELECT 1 FROM terms WHERE id = ?1", id)
}

pub fn course_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    exists(conn, "SELECT 1 FROM courses WHERE id = ?1", id)
}

pub fn category_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    exists(conn, "SELECT 1 FROM categories WHERE id = ?1", id)
}

/// Course the type belongs to, if the type exists.
pub fn type_course(conn: &Connection, type_id: i64) -> AppResult<Option<i64>> {
    let course = conn
        .query_row(
            "SELECT course_id FROM assignment_types WHERE id = ?1",
            [type_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(course)
}

fn exists(conn: &Connection, sql: &str, id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(sql)?;
    Ok(stmt.exists([id])?)
}

// ---------------------------
// Inserts
// ---------------------------

/// Allocate an id shared by assignments and events, so that every entry of
/// the combined list has a unique id.
fn next_item_id(conn: &Connection) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO item_ids (created_at) VALUES (?1)",
        [Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_term(conn: &Connection, term: &Term) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO terms (name, start_date, end_date) VALUES (?1, ?2, ?3)",
        params![term.name, term.start_date, term.end_date],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_course(conn: &Connection, course: &Course) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO courses (term_id, name, number, credits) VALUES (?1, ?2, ?3, ?4)",
        params![course.term_id, course.name, course.number, course.credits],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_type(conn: &Connection, t: &AssignmentType) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO assignment_types (course_id, name, weight) VALUES (?1, ?2, ?3)",
        params![t.course_id, t.name, t.weight],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_category(conn: &Connection, c: &Category) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO categories (name, color) VALUES (?1, ?2)",
        params![c.name, c.color],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert the assignment under a freshly allocated item id and return it.
pub fn insert_assignment(conn: &Connection, a: &Assignment) -> AppResult<i64> {
    let id = next_item_id(conn)?;
    conn.execute(
        "INSERT INTO assignments (id, course_id, type_id, name, due_date, due_time, done, grade, priority, comments)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            a.course_id,
            a.type_id,
            a.name,
            a.due_date,
            a.due_time,
            if a.done { 1 } else { 0 },
            a.grade,
            a.priority,
            a.comments,
        ],
    )?;
    Ok(id)
}

pub fn insert_event(conn: &Connection, ev: &Event) -> AppResult<i64> {
    let id = next_item_id(conn)?;
    conn.execute(
        "INSERT INTO events (id, category_id, name, event_year, date, start_time, end_time, all_day, location, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            ev.category_id,
            ev.name,
            ev.event_year,
            ev.date,
            ev.start_time,
            ev.end_time,
            if ev.all_day { 1 } else { 0 },
            ev.location,
            ev.description,
        ],
    )?;
    Ok(id)
}

// ---------------------------
// Updates / deletes
// ---------------------------

fn expect_one(n: usize, kind: &'static str, id: i64) -> AppResult<()> {
    if n == 0 {
        return Err(AppError::NotFound { kind, id });
    }
    Ok(())
}

pub fn update_term(conn: &Connection, t: &Term) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE terms SET name = ?1, start_date = ?2, end_date = ?3 WHERE id = ?4",
        params![t.name, t.start_date, t.end_date, t.id],
    )?;
    expect_one(n, "Term", t.id)
}

pub fn update_course(conn: &Connection, c: &Course) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE courses SET name = ?1, number = ?2, credits = ?3 WHERE id = ?4",
        params![c.name, c.number, c.credits, c.id],
    )?;
    expect_one(n, "Course", c.id)
}

pub fn update_type_name(conn: &Connection, type_id: i64, name: &str) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE assignment_types SET name = ?1 WHERE id = ?2",
        params![name, type_id],
    )?;
    expect_one(n, "Assignment type", type_id)
}

pub fn update_category(conn: &Connection, c: &Category) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE categories SET name = ?1, color = ?2 WHERE id = ?3",
        params![c.name, c.color, c.id],
    )?;
    expect_one(n, "Category", c.id)
}

pub fn update_event(conn: &Connection, ev: &Event) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE events
         SET category_id = ?1, name = ?2, event_year = ?3, date = ?4, start_time = ?5,
             end_time = ?6, all_day = ?7, location = ?8, description = ?9
         WHERE id = ?10",
        params![
            ev.category_id,
            ev.name,
            ev.event_year,
            ev.date,
            ev.start_time,
            ev.end_time,
            if ev.all_day { 1 } else { 0 },
            ev.location,
            ev.description,
            ev.id,
        ],
    )?;
    expect_one(n, "Event", ev.id)
}

pub fn update_type_weight(conn: &Connection, type_id: i64, weight: &str) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE assignment_types SET weight = ?1 WHERE id = ?2",
        params![weight, type_id],
    )?;
    expect_one(n, "Assignment type", type_id)
}

fn update_assignment(conn: &Connection, a: &Assignment) -> AppResult<()> {
    conn.execute(
        "UPDATE assignments
         SET type_id = ?1, name = ?2, due_date = ?3, due_time = ?4, done = ?5,
             grade = ?6, priority = ?7, comments = ?8
         WHERE id = ?9",
        params![
            a.type_id,
            a.name,
            a.due_date,
            a.due_time,
            if a.done { 1 } else { 0 },
            a.grade,
            a.priority,
            a.comments,
            a.id,
        ],
    )?;
    Ok(())
}

/// Write back the assignments of every course marked as changed, in one
/// transaction, then clear the flags. Returns the number of rows written.
pub fn save_changed(pool: &mut DbPool, book: &mut Gradebook) -> AppResult<usize> {
    let changed = book.changed_courses();
    if changed.is_empty() {
        return Ok(0);
    }

    let tx = pool.conn.transaction()?;
    let mut written = 0;
    for a in book.assignments().filter(|a| changed.contains(&a.course_id)) {
        update_assignment(&tx, a)?;
        written += 1;
    }
    tx.commit()?;

    book.clear_changed();
    Ok(written)
}

// Rows that reference the deleted one follow the foreign keys: courses,
// types and assignments cascade; events and assignments lose a deleted
// category or type (SET NULL).

pub fn delete_term(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM terms WHERE id = ?1", [id])?)
}

pub fn delete_course(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM courses WHERE id = ?1", [id])?)
}

pub fn delete_type(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM assignment_types WHERE id = ?1", [id])?)
}

pub fn delete_category(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM categories WHERE id = ?1", [id])?)
}

pub fn delete_assignment(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM assignments WHERE id = ?1", [id])?)
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM events WHERE id = ?1", [id])?)
}
