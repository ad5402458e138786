use todotasks_core::db::open_db_in_memory;
use todotasks_core::{MemoryTaskStore, SqliteTaskStore, Task, TaskStore};

fn fresh_store() -> SqliteTaskStore {
    let conn = open_db_in_memory().unwrap();
    SqliteTaskStore::try_new(conn).unwrap()
}

#[test]
fn subscribe_delivers_current_snapshot_immediately() {
    let store = fresh_store();

    let rx = store.subscribe();
    assert!(rx.borrow().is_empty());

    store.insert(&Task::new("late subscriber sees me", None)).unwrap();
    let late_rx = store.subscribe();
    assert_eq!(late_rx.borrow().len(), 1);
}

#[test]
fn mutation_re_emits_the_full_collection() {
    let store = fresh_store();
    let mut rx = store.subscribe();
    assert!(rx.borrow_and_update().is_empty());

    let id = store.insert(&Task::new("X", None)).unwrap();

    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, Some(id));
    assert_eq!(snapshot[0].title, "X");
    assert_eq!(snapshot[0].description, None);
    assert!(!snapshot[0].is_completed);
}

#[test]
fn emission_order_is_primary_key_ascending_and_stable() {
    let store = fresh_store();
    let mut rx = store.subscribe();

    let a = store.insert(&Task::new("a", None)).unwrap();
    let b = store.insert(&Task::new("b", None)).unwrap();
    let c = store.insert(&Task::new("c", None)).unwrap();

    let first = rx.borrow_and_update().clone();
    let ids: Vec<_> = first.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![Some(a), Some(b), Some(c)]);

    // An update must not reorder the collection.
    let held = store.get_by_id(b).unwrap().unwrap();
    store.update(&held.toggled()).unwrap();

    let second = rx.borrow_and_update().clone();
    let ids_after: Vec<_> = second.iter().map(|task| task.id).collect();
    assert_eq!(ids_after, vec![Some(a), Some(b), Some(c)]);
}

#[test]
fn every_subscriber_sees_every_snapshot() {
    let store = fresh_store();
    let mut first = store.subscribe();
    let mut second = store.subscribe();

    store.insert(&Task::new("shared", None)).unwrap();

    assert_eq!(first.borrow_and_update().len(), 1);
    assert_eq!(second.borrow_and_update().len(), 1);
}

#[test]
fn delete_re_emits_without_the_removed_task() {
    let store = fresh_store();
    let mut rx = store.subscribe();

    let keep = store.insert(&Task::new("keep", None)).unwrap();
    let doomed = store.insert(&Task::new("doomed", None)).unwrap();
    let victim = store.get_by_id(doomed).unwrap().unwrap();
    store.delete(&victim).unwrap();

    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, Some(keep));
}

#[test]
fn unavailable_medium_degrades_stream_to_empty_instead_of_terminating() {
    let store = MemoryTaskStore::new();
    let mut rx = store.subscribe();

    store.insert(&Task::new("soon gone from view", None)).unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);

    store.fail_storage(true);
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_empty());

    // The subscription itself stays alive and recovers with the medium.
    store.fail_storage(false);
    assert_eq!(rx.borrow_and_update().len(), 1);
}
