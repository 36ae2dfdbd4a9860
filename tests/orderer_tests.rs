mod common;

use common::{assignment, base_book, event, weighted_type};
use rgetorganized::core::diagnostics::MemoryLog;
use rgetorganized::core::orderer::{ListOrderer, SortDirection, SortKey};
use rgetorganized::core::schedule::project;
use rgetorganized::models::{Gradebook, ListItem};

fn ids(book: &Gradebook) -> Vec<i64> {
    book.items.iter().map(ListItem::id).collect()
}

fn asc(key: SortKey) -> ListOrderer {
    ListOrderer::new(key, SortDirection::Ascending)
}

fn desc(key: SortKey) -> ListOrderer {
    ListOrderer::new(key, SortDirection::Descending)
}

/// Assignments 1..=3 in Biology/Calculus, event 4 in category "Club".
fn schedule() -> Gradebook {
    let mut book = base_book();
    book.types = vec![
        weighted_type(1, 10, "Lab", "40%"),
        weighted_type(2, 20, "Quiz", "60%"),
    ];

    let mut a1 = assignment(1, "essay", 10, "03/12/2025");
    a1.type_id = Some(1);
    a1.grade = "72%".into();
    let mut a2 = assignment(2, "Problem set", 20, "03/05/2025");
    a2.type_id = Some(2);
    a2.done = true;
    a2.grade = "95.50%".into();
    let a3 = assignment(3, "Reading", 10, "03/20/2025");
    let mut e4 = event(4, "Club fair", "03/08/2025");
    e4.category_id = Some(1);

    book.items = vec![
        ListItem::Assignment(a1),
        ListItem::Assignment(a2),
        ListItem::Assignment(a3),
        ListItem::Event(e4),
    ];
    book
}

#[test]
fn default_order_is_due_date_ascending() {
    assert_eq!(ListOrderer::default(), asc(SortKey::DueDate));

    let mut book = schedule();
    let log = MemoryLog::new();
    ListOrderer::default().sort(&mut book, None, &log);
    assert_eq!(ids(&book), vec![2, 4, 1, 3]);
    assert!(log.is_empty());
}

#[test]
fn sorting_a_sorted_list_changes_nothing() {
    let log = MemoryLog::new();
    for key in [
        SortKey::Done,
        SortKey::Name,
        SortKey::Kind,
        SortKey::Course,
        SortKey::DueDate,
        SortKey::Grade,
    ] {
        for orderer in [asc(key), desc(key)] {
            let mut book = schedule();
            orderer.sort(&mut book, None, &log);
            let items = book.items.clone();
            let rows = project(&book);

            let again = orderer.sort(&mut book, None, &log);
            assert_eq!(again.swaps, 0, "{:?}", orderer);
            assert_eq!(book.items, items);
            assert_eq!(project(&book), rows);
        }
    }
}

/// Done assignment #1 in Biology, pending #2 in Calculus, event #3 with
/// no course: one distinct value per item for `Done` and `Course`.
fn three_ranks() -> Gradebook {
    let mut book = base_book();
    let mut done = assignment(1, "Notes", 10, "03/01/2025");
    done.done = true;
    book.items = vec![
        ListItem::Assignment(assignment(2, "Sheet", 20, "03/02/2025")),
        ListItem::Event(event(3, "Open day", "03/03/2025")),
        ListItem::Assignment(done),
    ];
    book
}

#[test]
fn descending_reverses_every_key_with_distinct_values() {
    let log = MemoryLog::new();
    let cases: [(SortKey, fn() -> Gradebook); 6] = [
        (SortKey::Done, three_ranks),
        (SortKey::Name, schedule),
        (SortKey::Kind, schedule),
        (SortKey::Course, three_ranks),
        (SortKey::DueDate, schedule),
        (SortKey::Grade, schedule),
    ];

    for (key, fixture) in cases {
        let mut up = fixture();
        asc(key).sort(&mut up, None, &log);
        let mut down = fixture();
        desc(key).sort(&mut down, None, &log);

        let mut reversed = ids(&down);
        reversed.reverse();
        assert_eq!(ids(&up), reversed, "{:?}", key);
    }
    assert!(log.is_empty());
}

#[test]
fn due_date_ties_of_the_same_kind_do_not_reverse() {
    // Three items due at the same instant. The assignment/event tie-break
    // flips with the direction, but the two assignments keep their input
    // order both ways, so descending is not the mirror of ascending here.
    let mut book = base_book();
    let mut ev = event(5, "Lecture", "04/01/2025");
    ev.start_time = "12:00 PM".into();
    book.items = vec![
        ListItem::Event(ev),
        ListItem::Assignment(assignment(6, "Lab report", 10, "04/01/2025")),
        ListItem::Assignment(assignment(7, "Worksheet", 20, "04/01/2025")),
    ];
    let unsorted = book.clone();

    let log = MemoryLog::new();
    asc(SortKey::DueDate).sort(&mut book, None, &log);
    assert_eq!(ids(&book), vec![6, 7, 5]);

    let mut book = unsorted;
    desc(SortKey::DueDate).sort(&mut book, None, &log);
    assert_eq!(ids(&book), vec![5, 6, 7]);
}

#[test]
fn names_compare_case_insensitively() {
    let mut book = schedule();
    let log = MemoryLog::new();
    asc(SortKey::Name).sort(&mut book, None, &log);
    // "Club fair" < "essay" < "Problem set" < "Reading"
    assert_eq!(ids(&book), vec![4, 1, 2, 3]);
}

#[test]
fn done_puts_finished_work_first_and_events_last() {
    let mut book = schedule();
    let log = MemoryLog::new();

    asc(SortKey::Done).sort(&mut book, None, &log);
    assert_eq!(ids(&book)[0], 2);
    assert_eq!(ids(&book)[3], 4);

    desc(SortKey::Done).sort(&mut book, None, &log);
    assert_eq!(ids(&book)[0], 4);
    assert_eq!(ids(&book)[3], 2);
}

#[test]
fn kind_and_course_use_names_with_blank_for_missing() {
    let log = MemoryLog::new();

    let mut book = schedule();
    asc(SortKey::Kind).sort(&mut book, None, &log);
    // "" (no type) < "Club" < "Lab" < "Quiz"
    assert_eq!(ids(&book), vec![3, 4, 1, 2]);

    let mut book = schedule();
    asc(SortKey::Course).sort(&mut book, None, &log);
    // event has no course and sorts first; stable among Biology items
    assert_eq!(ids(&book), vec![4, 1, 3, 2]);
}

#[test]
fn grade_ranks_events_then_ungraded_then_values() {
    let mut book = schedule();
    let log = MemoryLog::new();

    asc(SortKey::Grade).sort(&mut book, None, &log);
    assert_eq!(ids(&book), vec![4, 3, 1, 2]);

    desc(SortKey::Grade).sort(&mut book, None, &log);
    assert_eq!(ids(&book), vec![2, 1, 3, 4]);
    assert!(log.is_empty());
}

#[test]
fn unparseable_grade_ranks_as_ungraded_and_is_logged() {
    let mut book = schedule();
    if let ListItem::Assignment(a) = &mut book.items[0] {
        a.grade = "B-".into();
    }

    let log = MemoryLog::new();
    asc(SortKey::Grade).sort(&mut book, None, &log);
    assert_eq!(ids(&book)[0], 4);
    // compared in several passes, reported once
    assert_eq!(log.len(), 1);
    assert_eq!(log.entries()[0].target, "assignment 1");
}

#[test]
fn same_instant_assignment_and_event_tie_break() {
    let mut book = base_book();
    let mut ev = event(5, "Lecture", "04/01/2025");
    ev.start_time = "12:00 PM".into();
    book.items = vec![
        ListItem::Event(ev),
        ListItem::Assignment(assignment(6, "Lab report", 10, "04/01/2025")),
    ];

    let log = MemoryLog::new();
    asc(SortKey::DueDate).sort(&mut book, None, &log);
    assert_eq!(ids(&book), vec![6, 5]);

    desc(SortKey::DueDate).sort(&mut book, None, &log);
    assert_eq!(ids(&book), vec![5, 6]);

    // already in place: no swaps either way
    assert_eq!(desc(SortKey::DueDate).sort(&mut book, None, &log).swaps, 0);
}

#[test]
fn all_day_events_start_at_midnight() {
    let mut book = base_book();
    let mut ev = event(5, "Holiday", "04/01/2025");
    ev.all_day = true;
    ev.start_time = "11:00 PM".into();
    let mut early = assignment(6, "Quiz", 10, "04/01/2025");
    early.due_time = "8:00 AM".into();
    book.items = vec![ListItem::Assignment(early), ListItem::Event(ev)];

    let log = MemoryLog::new();
    asc(SortKey::DueDate).sort(&mut book, None, &log);
    assert_eq!(ids(&book), vec![5, 6]);
}

#[test]
fn malformed_dates_are_logged_and_the_sort_terminates() {
    let mut book = schedule();
    if let ListItem::Assignment(a) = &mut book.items[1] {
        a.due_date = "13/45/2025".into();
    }

    let log = MemoryLog::new();
    asc(SortKey::DueDate).sort(&mut book, None, &log);

    assert_eq!(book.items.len(), 4);
    assert_eq!(log.len(), 1);
    assert_eq!(log.entries()[0].target, "item 2");

    // a new sort reports it again
    desc(SortKey::DueDate).sort(&mut book, None, &log);
    assert_eq!(log.len(), 2);
}

#[test]
fn selection_follows_the_item() {
    let mut book = schedule();
    let log = MemoryLog::new();

    let outcome = asc(SortKey::DueDate).sort(&mut book, Some(3), &log);
    assert_eq!(outcome.selected, Some(3));
    assert_eq!(book.items[3].id(), 3);

    let outcome = desc(SortKey::DueDate).sort(&mut book, Some(3), &log);
    assert_eq!(outcome.selected, Some(0));
}

#[test]
fn removed_selection_is_not_restored() {
    let mut book = schedule();
    book.remove_item(3);

    let log = MemoryLog::new();
    let outcome = asc(SortKey::Name).sort(&mut book, Some(3), &log);
    assert_eq!(outcome.selected, None);
}

#[test]
fn rows_follow_the_sorted_list() {
    let mut book = schedule();
    let log = MemoryLog::new();
    asc(SortKey::DueDate).sort(&mut book, None, &log);

    let rows = project(&book);
    let row_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(row_ids, ids(&book));

    let fair = &rows[1];
    assert_eq!(fair.kind, "event");
    assert_eq!(fair.type_or_category, "Club");
    assert_eq!(fair.course, "");
    assert_eq!(fair.done, None);

    let set = &rows[0];
    assert_eq!(set.course, "Calculus");
    assert_eq!(set.grade, "95.50%");
}

#[test]
fn sort_keys_parse_from_text() {
    assert_eq!(SortKey::parse("due").unwrap(), SortKey::DueDate);
    assert_eq!(SortKey::parse("category").unwrap(), SortKey::Kind);
    assert_eq!(SortKey::parse("GRADE").unwrap(), SortKey::Grade);
    assert!(SortKey::parse("weight").is_err());
}
