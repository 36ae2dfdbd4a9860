use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, ok, position_of, rgo, setup_test_db, temp_out};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    rgo()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    rgo()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Assignments"))
        .stdout(contains("20250318_0002_add_lookup_indexes"));

    // migrations are applied only once
    rgo()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("up to date"));
}

#[test]
fn test_list_default_order_by_due_date() {
    let db_path = setup_test_db("cli_list_default");
    init_db_with_data(&db_path);

    let out = rgo()
        .args(["--db", &db_path, "--test", "list"])
        .output()
        .expect("run list");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);

    let hw = position_of(&stdout, "HW1");
    let fair = position_of(&stdout, "Career fair");
    let midterm = position_of(&stdout, "Midterm");
    assert!(hw < fair && fair < midterm, "{}", stdout);
    assert!(stdout.contains("sorted by due_date (ascending)"));
}

#[test]
fn test_list_sort_desc_and_select() {
    let db_path = setup_test_db("cli_list_desc");
    init_db_with_data(&db_path);

    let out = rgo()
        .args(["--db", &db_path, "--test", "list", "--sort", "name", "--desc", "--select", "1"])
        .output()
        .expect("run list");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);

    // Midterm > HW1 > Career fair
    assert!(position_of(&stdout, "Midterm") < position_of(&stdout, "HW1"));
    assert!(position_of(&stdout, "HW1") < position_of(&stdout, "Career fair"));
    assert!(stdout.contains("▶"));
}

#[test]
fn test_list_rejects_unknown_sort_key() {
    let db_path = setup_test_db("cli_list_bad_key");
    init_db_with_data(&db_path);

    rgo()
        .args(["--db", &db_path, "--test", "list", "--sort", "weight"])
        .assert()
        .failure();
}

#[test]
fn test_grade_and_course_report() {
    let db_path = setup_test_db("cli_grades");
    init_db_with_data(&db_path);

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "grade", "1", "8 out of 10"])
        .assert()
        .success()
        .stdout(contains("80%"));
    ok(&db_path, &["assignment", "grade", "2", "100"]);

    // grades only count once the work is done
    rgo()
        .args(["--db", &db_path, "--test", "grades"])
        .assert()
        .success()
        .stdout(contains("Term grade: "))
        .stdout(contains("--"));

    ok(&db_path, &["assignment", "done", "1"]);
    ok(&db_path, &["assignment", "done", "2"]);

    rgo()
        .args(["--db", &db_path, "--test", "grades", "--term", "1"])
        .assert()
        .success()
        .stdout(contains("Spring 2025"))
        .stdout(contains("90%"))
        .stdout(contains("Homework 80% (50%)"));
}

#[test]
fn test_invalid_grade_is_rejected() {
    let db_path = setup_test_db("cli_bad_grade");
    init_db_with_data(&db_path);

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "grade", "1", "great"])
        .assert()
        .failure()
        .stderr(contains("Invalid grade: great"));

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "grade", "99", "90"])
        .assert()
        .failure()
        .stderr(contains("Assignment #99 not found"));
}

#[test]
fn test_weights_cannot_exceed_one_hundred() {
    let db_path = setup_test_db("cli_weights");
    init_db_with_data(&db_path);

    rgo()
        .args(["--db", &db_path, "--test", "type", "add", "Quizzes", "--course", "1", "--weight", "10"])
        .assert()
        .failure()
        .stderr(contains("110%"));

    ok(&db_path, &["type", "weight", "2", "30"]);

    rgo()
        .args(["--db", &db_path, "--test", "type", "list", "--course", "1"])
        .assert()
        .success()
        .stdout(contains("30%"))
        .stdout(contains("Total weight: 80%"));
}

#[test]
fn test_event_and_assignment_validation() {
    let db_path = setup_test_db("cli_validation");
    init_db_with_data(&db_path);

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "add", "Essay", "--course", "1", "--due", "31/31/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "add", "Essay", "--course", "7", "--due", "today"])
        .assert()
        .failure()
        .stderr(contains("Course #7 not found"));

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "add", "Essay", "--course", "1", "--due", "today", "--priority", "9"])
        .assert()
        .failure()
        .stderr(contains("Priority must be between 1 and 5"));

    rgo()
        .args(["--db", &db_path, "--test", "event", "add", "Talk", "--date", "03/01/2025", "--start", "3:00 PM", "--end", "1:00 PM"])
        .assert()
        .failure()
        .stderr(contains("event ends at 1:00 PM before it starts at 3:00 PM"));

    rgo()
        .args(["--db", &db_path, "--test", "category", "add", "Sports", "--color", "green"])
        .assert()
        .failure()
        .stderr(contains("Invalid color"));
}

#[test]
fn test_item_ids_are_unique_across_kinds() {
    let db_path = setup_test_db("cli_item_ids");
    init_db_with_data(&db_path);

    rgo()
        .args(["--db", &db_path, "--test", "event", "add", "Seminar", "--date", "03/25/2025", "--all-day"])
        .assert()
        .success()
        .stdout(contains("Event #4"));

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "add", "Final", "--course", "1", "--due", "05/01/2025"])
        .assert()
        .success()
        .stdout(contains("Assignment #5"));
}

#[test]
fn test_delete_with_confirmation() {
    let db_path = setup_test_db("cli_delete");
    init_db_with_data(&db_path);

    rgo()
        .args(["--db", &db_path, "--test", "del", "--event", "3"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    rgo()
        .args(["--db", &db_path, "--test", "del", "--event", "3"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Event #3 has been deleted"));

    rgo()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("Career fair").not());

    rgo()
        .args(["--db", &db_path, "--test", "del", "--event", "3"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(contains("Event #3 not found"));
}

#[test]
fn test_export_schedule_csv_and_json() {
    let db_path = setup_test_db("cli_export_schedule");
    init_db_with_data(&db_path);

    let csv_out = temp_out("cli_export_schedule", "csv");
    ok(&db_path, &["export", "--format", "csv", "--file", &csv_out]);
    let content = fs::read_to_string(&csv_out).expect("read exported csv");
    assert!(content.starts_with("id,kind,done,name,type,course,date,time,grade,priority"));
    assert!(content.contains("Career fair"));
    assert!(content.contains("03/20/2025"));

    let json_out = temp_out("cli_export_schedule", "json");
    ok(&db_path, &["export", "--format", "json", "--file", &json_out]);
    let content = fs::read_to_string(&json_out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(rows.as_array().map(Vec::len), Some(3));
    assert_eq!(rows[0]["name"], "HW1");
}

#[test]
fn test_export_grades_and_force() {
    let db_path = setup_test_db("cli_export_grades");
    init_db_with_data(&db_path);
    ok(&db_path, &["assignment", "grade", "1", "3/4"]);
    ok(&db_path, &["assignment", "done", "1"]);

    let out = temp_out("cli_export_grades", "csv");
    ok(&db_path, &["export", "--grades", "--file", &out]);
    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Algorithms,CS 301,Spring 2025,4,75%,1"));

    // existing file: declined without --force
    rgo()
        .args(["--db", &db_path, "--test", "export", "--grades", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    ok(&db_path, &["export", "--grades", "--file", &out, "--force"]);
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("cli_backup");
    init_db_with_data(&db_path);

    let out = temp_out("cli_backup", "sqlite");
    rgo()
        .args(["--db", &db_path, "--test", "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&out).is_ok());

    let zipped = temp_out("cli_backup_compressed", "sqlite");
    rgo()
        .args(["--db", &db_path, "--test", "backup", "--file", &zipped, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(fs::metadata(&zipped).is_err(), "uncompressed copy removed");

    rgo()
        .args(["--db", &db_path, "--test", "backup", "--file", "relative.sqlite"])
        .assert()
        .failure()
        .stderr(contains("absolute path"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_data(&db_path);
    ok(&db_path, &["assignment", "grade", "1", "90"]);

    rgo()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("assignment 1"))
        .stdout(contains("stored as 90%"));

    rgo()
        .args(["--db", &db_path, "--test", "log", "--print", "--op", "parse_error"])
        .assert()
        .success()
        .stdout(contains("Internal log is empty"));
}

#[test]
fn test_edit_terms_courses_types_and_categories() {
    let db_path = setup_test_db("cli_edit_entities");
    init_db_with_data(&db_path);

    rgo()
        .args(["--db", &db_path, "--test", "term", "edit", "1", "--name", "Spring 2026"])
        .assert()
        .success()
        .stdout(contains("Term #1 updated"));
    rgo()
        .args(["--db", &db_path, "--test", "term", "list"])
        .assert()
        .success()
        .stdout(contains("Spring 2026"));

    rgo()
        .args(["--db", &db_path, "--test", "term", "edit", "1", "--end", "01/01/2025"])
        .assert()
        .failure()
        .stderr(contains("term ends on 01/01/2025 before it starts on 01/13/2025"));

    rgo()
        .args(["--db", &db_path, "--test", "term", "edit", "1"])
        .assert()
        .failure()
        .stderr(contains("Nothing to change for term #1"));

    ok(&db_path, &["course", "edit", "1", "--name", "Data Structures", "--credits", "3"]);
    rgo()
        .args(["--db", &db_path, "--test", "course", "list"])
        .assert()
        .success()
        .stdout(contains("Data Structures"))
        .stdout(contains("Algorithms").not());

    ok(&db_path, &["type", "rename", "1", "Labs"]);
    rgo()
        .args(["--db", &db_path, "--test", "type", "list", "--course", "1"])
        .assert()
        .success()
        .stdout(contains("Labs"))
        .stdout(contains("Homework").not());

    ok(&db_path, &["category", "edit", "1", "--color", "#112233"]);
    rgo()
        .args(["--db", &db_path, "--test", "category", "list"])
        .assert()
        .success()
        .stdout(contains("#112233"));

    rgo()
        .args(["--db", &db_path, "--test", "type", "rename", "9", "Quizzes"])
        .assert()
        .failure()
        .stderr(contains("Assignment type #9 not found"));
}

#[test]
fn test_edit_assignment_details() {
    let db_path = setup_test_db("cli_edit_assignment");
    init_db_with_data(&db_path);

    ok(
        &db_path,
        &[
            "assignment", "edit", "1", "--name", "HW1 revised", "--due", "04/01/2025", "--priority",
            "5", "--comments", "late submission",
        ],
    );

    let out = rgo()
        .args(["--db", &db_path, "--test", "list"])
        .output()
        .expect("run list");
    let stdout = String::from_utf8_lossy(&out.stdout);
    // moved past the midterm by its new due date
    assert!(position_of(&stdout, "Midterm") < position_of(&stdout, "HW1 revised"));

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "edit", "1", "--priority", "0"])
        .assert()
        .failure()
        .stderr(contains("Priority must be between 1 and 5"));

    rgo()
        .args(["--db", &db_path, "--test", "assignment", "edit", "1", "--type", "9"])
        .assert()
        .failure()
        .stderr(contains("Assignment type #9 not found"));

    // a type of another course
    ok(&db_path, &["course", "add", "Physics", "--term", "1"]);
    ok(&db_path, &["type", "add", "Labs", "--course", "2"]);
    rgo()
        .args(["--db", &db_path, "--test", "assignment", "edit", "1", "--type", "3"])
        .assert()
        .failure()
        .stderr(contains("Assignment type #3 belongs to course #2, not #1"));

    ok(&db_path, &["assignment", "edit", "1", "--type", "2"]);
    rgo()
        .args(["--db", &db_path, "--test", "log", "--print", "--op", "edit"])
        .assert()
        .success()
        .stdout(contains("updated name, due, priority, comments"))
        .stdout(contains("updated type"));
}

#[test]
fn test_edit_event_details() {
    let db_path = setup_test_db("cli_edit_event");
    init_db_with_data(&db_path);

    rgo()
        .args([
            "--db", &db_path, "--test", "event", "edit", "3", "--location", "Gym", "--description",
            "Bring a CV",
        ])
        .assert()
        .success()
        .stdout(contains("Event #3 updated"));

    // moved before HW1 (03/10/2025)
    ok(&db_path, &["event", "edit", "3", "--date", "2025-03-01", "--name", "Job fair"]);
    let out = rgo()
        .args(["--db", &db_path, "--test", "list"])
        .output()
        .expect("run list");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(position_of(&stdout, "Job fair") < position_of(&stdout, "HW1"));
    assert!(stdout.contains("03/01/2025"));

    rgo()
        .args([
            "--db", &db_path, "--test", "event", "edit", "3", "--start", "3:00 PM", "--end",
            "1:00 PM",
        ])
        .assert()
        .failure()
        .stderr(contains("event ends at 1:00 PM before it starts at 3:00 PM"));

    rgo()
        .args(["--db", &db_path, "--test", "event", "edit", "3", "--category", "7"])
        .assert()
        .failure()
        .stderr(contains("Category #7 not found"));

    rgo()
        .args(["--db", &db_path, "--test", "event", "edit", "9", "--name", "Nothing"])
        .assert()
        .failure()
        .stderr(contains("Event #9 not found"));
}

#[test]
fn test_delete_cascades_through_dependents() {
    let db_path = setup_test_db("cli_delete_cascade");
    init_db_with_data(&db_path);

    // the type goes, its assignments stay untyped
    rgo()
        .args(["--db", &db_path, "--test", "del", "--type", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("kept without a type"))
        .stdout(contains("Assignment type #1 has been deleted"));
    rgo()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("HW1"));

    // same for events of a deleted category
    rgo()
        .args(["--db", &db_path, "--test", "del", "--category", "1"])
        .write_stdin("y\n")
        .assert()
        .success();
    rgo()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("Career fair"));

    // a course takes its assignments with it
    rgo()
        .args(["--db", &db_path, "--test", "del", "--course", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("deleted too"));
    rgo()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("Career fair"))
        .stdout(contains("HW1").not())
        .stdout(contains("Midterm").not());

    rgo()
        .args(["--db", &db_path, "--test", "del", "--term", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Term #1 has been deleted"));
    rgo()
        .args(["--db", &db_path, "--test", "term", "list"])
        .assert()
        .success()
        .stdout(contains("No terms yet"));

    // exactly one target
    rgo()
        .args(["--db", &db_path, "--test", "del"])
        .assert()
        .failure();
    rgo()
        .args(["--db", &db_path, "--test", "del", "--term", "1", "--event", "3"])
        .assert()
        .failure();
}

#[test]
fn test_restore_from_backup() {
    let db_path = setup_test_db("cli_restore");
    init_db_with_data(&db_path);

    let plain = temp_out("cli_restore_plain", "sqlite");
    ok(&db_path, &["backup", "--file", &plain]);
    rgo()
        .args(["--db", &db_path, "--test", "del", "--event", "3"])
        .write_stdin("y\n")
        .assert()
        .success();

    // declined: nothing changes
    rgo()
        .args(["--db", &db_path, "--test", "restore", "--file", &plain])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Restore cancelled"));
    rgo()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("Career fair").not());

    rgo()
        .args(["--db", &db_path, "--test", "restore", "--file", &plain])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Database restored"));
    rgo()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("Career fair"));

    // compressed backups are unpacked
    let packed = temp_out("cli_restore_packed", "sqlite");
    ok(&db_path, &["backup", "--file", &packed, "--compress"]);
    let archive = if cfg!(target_os = "windows") {
        packed.replace(".sqlite", ".zip")
    } else {
        format!("{}.tar.gz", packed)
    };
    rgo()
        .args(["--db", &db_path, "--test", "del", "--assignment", "1"])
        .write_stdin("y\n")
        .assert()
        .success();
    ok(&db_path, &["restore", "--file", &archive, "--force"]);
    rgo()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("HW1"));

    rgo()
        .args(["--db", &db_path, "--test", "log", "--print", "--op", "restore"])
        .assert()
        .success()
        .stdout(contains("Database restored from backup"));
}

#[test]
fn test_restore_rejects_bad_files() {
    let db_path = setup_test_db("cli_restore_bad");
    init_db_with_data(&db_path);

    let junk = temp_out("cli_restore_junk", "sqlite");
    fs::write(&junk, "not a database at all").expect("write junk file");
    rgo()
        .args(["--db", &db_path, "--test", "restore", "--file", &junk, "--force"])
        .assert()
        .failure()
        .stderr(contains("Invalid backup"));

    let missing = temp_out("cli_restore_missing", "sqlite");
    rgo()
        .args(["--db", &db_path, "--test", "restore", "--file", &missing, "--force"])
        .assert()
        .failure()
        .stderr(contains("Backup not found"));

    // the current database is untouched
    rgo()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("Career fair"));
}
