use rusqlite::Connection;
use std::collections::HashSet;
use todotasks_core::db::migrations::latest_version;
use todotasks_core::db::open_db_in_memory;
use todotasks_core::{SqliteTaskStore, StoreError, Task, TaskService, TaskStore};

fn fresh_store() -> SqliteTaskStore {
    let conn = open_db_in_memory().unwrap();
    SqliteTaskStore::try_new(conn).unwrap()
}

#[test]
fn insert_and_get_roundtrip() {
    let store = fresh_store();

    let id = store.insert(&Task::new("first task", Some("details"))).unwrap();

    let loaded = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.title, "first task");
    assert_eq!(loaded.description.as_deref(), Some("details"));
    assert!(!loaded.is_completed);
}

#[test]
fn get_by_id_is_absent_for_unknown_id() {
    let store = fresh_store();
    assert_eq!(store.get_by_id(42).unwrap(), None);
}

#[test]
fn assigned_ids_are_unique_even_after_delete() {
    let store = fresh_store();

    let mut assigned = HashSet::new();
    for index in 0..5 {
        let id = store.insert(&Task::new(format!("task {index}"), None)).unwrap();
        assert!(assigned.insert(id), "id {id} was handed out twice");
    }

    // Free the highest id, then insert again: the id must not come back.
    let last = *assigned.iter().max().unwrap();
    let victim = store.get_by_id(last).unwrap().unwrap();
    store.delete(&victim).unwrap();

    let fresh = store.insert(&Task::new("after delete", None)).unwrap();
    assert!(
        assigned.insert(fresh),
        "id {fresh} was reused after a delete"
    );
}

#[test]
fn insert_ignores_caller_supplied_id() {
    let store = fresh_store();

    let mut task = Task::new("stray id", None);
    task.id = Some(999);
    let id = store.insert(&task).unwrap();

    assert_ne!(id, 999);
    assert_eq!(store.get_by_id(999).unwrap(), None);
}

#[test]
fn update_replaces_fields_and_preserves_identity() {
    let store = fresh_store();

    let id = store.insert(&Task::new("A", None)).unwrap();
    let mut held = store.get_by_id(id).unwrap().unwrap();
    held.is_completed = true;
    store.update(&held).unwrap();

    // Edit title/description off the held record; id and flag must survive.
    let edited = held.edited("B", Some("d"));
    store.update(&edited).unwrap();

    let loaded = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.title, "B");
    assert_eq!(loaded.description.as_deref(), Some("d"));
    assert!(loaded.is_completed);
}

#[test]
fn update_of_missing_id_is_a_silent_noop() {
    let store = fresh_store();

    let id = store.insert(&Task::new("survivor", None)).unwrap();

    let ghost = Task {
        id: Some(id + 100),
        title: "ghost".to_string(),
        description: None,
        is_completed: false,
    };
    store.update(&ghost).unwrap();

    assert_eq!(store.get_by_id(id + 100).unwrap(), None);
    assert_eq!(store.get_by_id(id).unwrap().unwrap().title, "survivor");
}

#[test]
fn update_without_id_is_a_silent_noop() {
    let store = fresh_store();

    let id = store.insert(&Task::new("kept", None)).unwrap();
    store.update(&Task::new("never persisted", None)).unwrap();

    let mut rx = store.subscribe();
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, Some(id));
}

#[test]
fn delete_removes_and_is_noop_on_nonexistence() {
    let store = fresh_store();

    let keep = store.insert(&Task::new("keep", None)).unwrap();
    let doomed = store.insert(&Task::new("doomed", None)).unwrap();

    let victim = store.get_by_id(doomed).unwrap().unwrap();
    store.delete(&victim).unwrap();
    assert_eq!(store.get_by_id(doomed).unwrap(), None);

    // Second delete of the same record must not fail or touch others.
    store.delete(&victim).unwrap();
    assert_eq!(store.get_by_id(keep).unwrap().unwrap().title, "keep");
}

#[test]
fn description_is_persisted_as_absent_when_blank() {
    let store = fresh_store();

    let empty = store.insert(&Task::new("X", Some(""))).unwrap();
    let spaces = store.insert(&Task::new("Y", Some("   "))).unwrap();

    assert_eq!(store.get_by_id(empty).unwrap().unwrap().description, None);
    assert_eq!(store.get_by_id(spaces).unwrap().unwrap().description, None);
}

#[test]
fn service_forwards_store_calls_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskStore::try_new(conn).unwrap());

    let id = service.insert(&Task::new("via service", None)).unwrap();
    let fetched = service.get_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.title, "via service");

    service.update(&fetched.toggled()).unwrap();
    assert!(service.get_by_id(id).unwrap().unwrap().is_completed);

    service.delete(&fetched).unwrap();
    assert_eq!(service.get_by_id(id).unwrap(), None);
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTaskStore::try_new(conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskStore::try_new(conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredTable("tasks"))
    ));
}

#[test]
fn store_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskStore::try_new(conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredColumn {
            table: "tasks",
            column: "description"
        })
    ));
}

#[test]
fn store_rejects_corrupt_completion_flag() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (title, is_completed) VALUES ('corrupt', 7);",
        [],
    )
    .unwrap();

    // try_new seeds the stream from load_all, which must refuse the row.
    let result = SqliteTaskStore::try_new(conn);
    assert!(matches!(result, Err(StoreError::InvalidData(_))));
}
