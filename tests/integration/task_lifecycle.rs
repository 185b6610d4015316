//! Integration tests for task list persistence.
//!
//! Covers the store contract end to end against real files: empty start,
//! append/update/remove with reloads between every step, corrupt files and
//! byte-stable round trips with files written by other tools.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskslip::tasks::{TaskError, TaskStore};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Creates a store in a fresh temp directory.
fn make_store() -> (tempfile::TempDir, TaskStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TaskStore::new(dir.path().join("tarefas.json"));
    (dir, store)
}

/// Saves `items` through the store and returns the owned list.
fn seed(store: &TaskStore, items: &[&str]) -> Vec<String> {
    let tasks: Vec<String> = items.iter().map(ToString::to_string).collect();
    store.save(&tasks).expect("seed");
    tasks
}

// ===========================================================================
// Mutations, reloading between every step
// ===========================================================================

#[test]
fn update_then_remove_scenario() {
    let (_dir, store) = make_store();
    seed(&store, &["A", "B", "C"]);

    let mut tasks = store.load().unwrap();
    store.update(&mut tasks, 1, "B2").unwrap();
    assert_eq!(store.load().unwrap(), vec!["A", "B2", "C"]);

    let mut tasks = store.load().unwrap();
    let removed = store.remove(&mut tasks, 0).unwrap();
    assert_eq!(removed, "A");
    assert_eq!(store.load().unwrap(), vec!["B2", "C"]);
}

#[test]
fn remove_each_position_preserves_relative_order() {
    let items = ["one", "two", "three", "four", "five"];
    for i in 0..items.len() {
        let (_dir, store) = make_store();
        seed(&store, &items);

        let mut tasks = store.load().unwrap();
        store.remove(&mut tasks, i).unwrap();

        let mut expected: Vec<&str> = items.to_vec();
        expected.remove(i);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), items.len() - 1);
        assert_eq!(loaded, expected);
    }
}

#[test]
fn blank_appends_leave_file_unchanged() {
    let (_dir, store) = make_store();
    seed(&store, &["A"]);
    let before = std::fs::read(store.path()).unwrap();

    let mut tasks = store.load().unwrap();
    for blank in ["", "   ", "\t\n"] {
        assert!(matches!(
            store.append(&mut tasks, blank),
            Err(TaskError::EmptyInput)
        ));
    }

    assert_eq!(tasks, vec!["A"]);
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[test]
fn stale_index_is_rejected_after_shrink() {
    let (_dir, store) = make_store();
    seed(&store, &["A", "B"]);

    let mut tasks = store.load().unwrap();
    store.remove(&mut tasks, 1).unwrap();

    let mut fresh = store.load().unwrap();
    let err = store.remove(&mut fresh, 1).unwrap_err();
    assert!(matches!(err, TaskError::IndexOutOfRange { index: 1, len: 1 }));
}

#[test]
fn mutations_are_visible_to_a_second_store() {
    let (dir, store) = make_store();
    let other = TaskStore::new(dir.path().join("tarefas.json"));

    let mut tasks = Vec::new();
    store.append(&mut tasks, "Regar plantas").unwrap();
    assert_eq!(other.load().unwrap(), vec!["Regar plantas"]);
}

// ===========================================================================
// File format
// ===========================================================================

#[test]
fn existing_file_round_trips_byte_for_byte() {
    let (_dir, store) = make_store();
    let legacy = "[\n    \"Comprar pão\",\n    \"Ligar para a mãe\",\n    \"Revisar relatório\"\n]";
    std::fs::write(store.path(), legacy).unwrap();

    let tasks = store.load().unwrap();
    store.save(&tasks).unwrap();

    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), legacy);
}

#[test]
fn empty_list_round_trips() {
    let (_dir, store) = make_store();
    store.save(&[]).unwrap();
    let before = std::fs::read(store.path()).unwrap();
    assert_eq!(before, b"[]");

    let tasks = store.load().unwrap();
    store.save(&tasks).unwrap();
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[test]
fn non_array_file_is_corrupt_and_recoverable() {
    let (_dir, store) = make_store();
    std::fs::write(store.path(), r#""just a string""#).unwrap();

    let err = store.load().unwrap_err();
    assert!(err.is_corrupt());

    // A new task overwrites the corrupt file.
    let mut tasks = Vec::new();
    store.append(&mut tasks, "Recomeçar").unwrap();
    assert_eq!(store.load().unwrap(), vec!["Recomeçar"]);
}
