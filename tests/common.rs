#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rgetorganized::models::{
    Assignment, AssignmentType, Category, Course, Event, Gradebook, ListItem, Term,
};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rgo() -> Command {
    cargo_bin_cmd!("rgetorganized")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rgetorganized.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run one command against `db_path` in test mode and require success.
pub fn ok(db_path: &str, args: &[&str]) {
    rgo()
        .args(["--db", db_path, "--test"])
        .args(args)
        .assert()
        .success();
}

/// Initialize DB and add a small dataset useful for many tests:
///
/// - term #1 "Spring 2025", course #1 "Algorithms"
/// - types #1 "Homework" 50% and #2 "Exams" 50%
/// - assignment #1 "HW1" (03/10/2025), assignment #2 "Midterm" (03/20/2025)
/// - category #1 "Campus", event #3 "Career fair" (03/15/2025)
pub fn init_db_with_data(db_path: &str) {
    ok(db_path, &["init"]);
    ok(
        db_path,
        &["term", "add", "Spring 2025", "--start", "01/13/2025", "--end", "05/09/2025"],
    );
    ok(
        db_path,
        &["course", "add", "Algorithms", "--term", "1", "--number", "CS 301", "--credits", "4"],
    );
    ok(db_path, &["type", "add", "Homework", "--course", "1", "--weight", "50"]);
    ok(db_path, &["type", "add", "Exams", "--course", "1", "--weight", "50%"]);
    ok(
        db_path,
        &["assignment", "add", "HW1", "--course", "1", "--type", "1", "--due", "03/10/2025"],
    );
    ok(
        db_path,
        &[
            "assignment", "add", "Midterm", "--course", "1", "--type", "2", "--due", "2025-03-20",
            "--time", "09:30",
        ],
    );
    ok(db_path, &["category", "add", "Campus", "--color", "#00aa00"]);
    ok(
        db_path,
        &["event", "add", "Career fair", "--date", "03/15/2025", "--category", "1"],
    );
}

/// Byte offset of `needle` in `haystack`; panics with context when absent.
pub fn position_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in:\n{}", needle, haystack))
}

// ---------------------------
// In-memory fixtures
// ---------------------------

pub fn assignment(id: i64, name: &str, course_id: i64, due: &str) -> Assignment {
    Assignment::new(id, name, course_id, due)
}

pub fn graded(
    id: i64,
    course_id: i64,
    type_id: i64,
    grade: &str,
    due: &str,
) -> ListItem {
    let mut a = Assignment::new(id, &format!("A{}", id), course_id, due);
    a.type_id = Some(type_id);
    a.grade = grade.to_string();
    a.done = true;
    ListItem::Assignment(a)
}

pub fn event(id: i64, name: &str, date: &str) -> Event {
    Event::new(id, name, date)
}

pub fn weighted_type(id: i64, course_id: i64, name: &str, weight: &str) -> AssignmentType {
    let mut t = AssignmentType::new(id, course_id, name);
    t.weight = weight.to_string();
    t
}

/// One term with two courses (#10 "Biology", #20 "Calculus") and a
/// category #1 "Club".
pub fn base_book() -> Gradebook {
    Gradebook {
        terms: vec![Term::new(1, "Fall", "09/01/2025", "12/20/2025")],
        courses: vec![Course::new(10, 1, "Biology"), Course::new(20, 1, "Calculus")],
        types: Vec::new(),
        categories: vec![Category::new(1, "Club")],
        items: Vec::new(),
    }
}
