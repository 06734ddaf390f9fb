//! Tests for building organized views from tasks held in the store.

use chrono::{Days, NaiveDate};
use todo_organizer::db::Database;
use todo_organizer::organizer::{
    FilterOption, SortOption, TaskClass, classify, load_view, organize,
};
use todo_organizer::types::{Task, TaskStatus};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn in_days(n: u64) -> String {
    (today() + Days::new(n)).format("%Y-%m-%d").to_string()
}

fn ago(n: u64) -> String {
    (today() - Days::new(n)).format("%Y-%m-%d").to_string()
}

fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

fn ids(db: &Database, filter: FilterOption, sort: SortOption) -> Vec<i64> {
    load_view(db, filter, sort, today())
        .unwrap()
        .tasks
        .iter()
        .map(|t| t.task.id)
        .collect()
}

#[test]
fn classification_matches_documented_examples() {
    let db = setup_db();
    let due_today = db.add_task("today", &in_days(0)).unwrap();
    let due_in_8 = db.add_task("next week+", &in_days(8)).unwrap();
    let overdue = db.add_task("yesterday", &ago(1)).unwrap();
    let done = db.add_task("done", &in_days(1)).unwrap();
    db.set_task_status(done, TaskStatus::Complete).unwrap();

    let class_of = |id| classify(&db.get_task(id).unwrap().unwrap(), today());

    assert_eq!(class_of(due_today), TaskClass::ShortTerm);
    assert_eq!(class_of(due_in_8), TaskClass::LongTerm);
    assert_eq!(class_of(overdue), TaskClass::ShortTerm);
    assert_eq!(class_of(done), TaskClass::Other);
}

#[test]
fn due_date_sort_with_undated_completed_task() {
    // Legacy rows can lack a due date, so build this list directly.
    let tasks = vec![
        Task {
            id: 1,
            description: "long".to_string(),
            status: TaskStatus::Pending,
            due_date: Some(today() + Days::new(10)),
        },
        Task {
            id: 2,
            description: "short".to_string(),
            status: TaskStatus::Pending,
            due_date: Some(today() + Days::new(2)),
        },
        Task {
            id: 3,
            description: "undated".to_string(),
            status: TaskStatus::Complete,
            due_date: None,
        },
    ];

    let view = organize(tasks, FilterOption::All, SortOption::DueDate, today());

    let order: Vec<i64> = view.iter().map(|t| t.task.id).collect();
    assert_eq!(order, vec![2, 1, 3]);
}

#[test]
fn st_pending_filter_returns_only_near_pending_tasks() {
    let db = setup_db();
    let near = db.add_task("near", &in_days(1)).unwrap();
    db.add_task("far", &in_days(30)).unwrap();
    let done = db.add_task("done", &in_days(1)).unwrap();
    db.set_task_status(done, TaskStatus::Complete).unwrap();

    assert_eq!(ids(&db, FilterOption::StPending, SortOption::DueDate), vec![near]);
}

#[test]
fn views_over_a_mixed_store() {
    let db = setup_db();
    let a = db.add_task("2 - renew passport", &in_days(40)).unwrap();
    let b = db.add_task("1 - pay rent", &in_days(3)).unwrap();
    let c = db.add_task("1 - overdue report", &ago(2)).unwrap();
    let d = db.add_task("archived", &ago(10)).unwrap();
    let e = db.add_task("2 - plan trip", &in_days(9)).unwrap();
    db.set_task_status(d, TaskStatus::Complete).unwrap();

    assert_eq!(ids(&db, FilterOption::All, SortOption::Id), vec![a, b, c, d, e]);
    assert_eq!(ids(&db, FilterOption::All, SortOption::DueDate), vec![c, b, d, e, a]);
    assert_eq!(ids(&db, FilterOption::StPending, SortOption::DueDate), vec![c, b]);
    assert_eq!(ids(&db, FilterOption::LtPending, SortOption::DueDate), vec![e, a]);
    assert_eq!(ids(&db, FilterOption::Complete, SortOption::Id), vec![d]);
}

#[test]
fn view_refreshes_after_mutations() {
    let db = setup_db();
    let id = db.add_task("water plants", &in_days(2)).unwrap();
    assert_eq!(ids(&db, FilterOption::StPending, SortOption::Id), vec![id]);

    db.toggle_task_status(id).unwrap();
    assert!(ids(&db, FilterOption::StPending, SortOption::Id).is_empty());
    assert_eq!(ids(&db, FilterOption::Complete, SortOption::Id), vec![id]);

    db.toggle_task_status(id).unwrap();
    db.update_task(id, "water plants", &in_days(20)).unwrap();
    assert_eq!(ids(&db, FilterOption::LtPending, SortOption::Id), vec![id]);

    db.delete_task(id).unwrap();
    assert!(ids(&db, FilterOption::All, SortOption::Id).is_empty());
}

#[test]
fn summary_counts_whole_store_regardless_of_filter() {
    let db = setup_db();
    db.add_task("near", &in_days(1)).unwrap();
    db.add_task("late", &ago(1)).unwrap();
    db.add_task("far", &in_days(12)).unwrap();

    let view = load_view(&db, FilterOption::LtPending, SortOption::DueDate, today()).unwrap();

    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.summary.total, 3);
    assert_eq!(view.summary.short_term_pending, 2);
    assert_eq!(view.summary.overdue, 1);
    assert_eq!(view.summary.long_term_pending, 1);
}
