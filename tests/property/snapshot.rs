//! Property-based snapshot tests.
//!
//! Uses proptest to verify:
//! 1. Saving what was just loaded leaves the task file byte-identical.
//! 2. Removing any valid index drops exactly that task and keeps the rest in order.
//! 3. Selections keep request order and length for any valid index sequence.
//! 4. Arbitrary file contents never cause a panic in `load`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;

use proptest::prelude::*;
use taskslip::print::PrintSessionBuilder;
use taskslip::tasks::TaskStore;

/// Strategy for non-blank task text, including accents and quotes.
fn arb_task() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9çãéíõú\"' ]{0,40}[a-zA-Z0-9çãéíõú]"
}

fn arb_tasks() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_task(), 0..20)
}

fn make_store() -> (tempfile::TempDir, TaskStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(dir.path().join("tarefas.json"));
    (dir, store)
}

proptest! {
    #[test]
    fn save_of_load_is_byte_identical(tasks in arb_tasks()) {
        let (_dir, store) = make_store();
        store.save(&tasks).unwrap();
        let first = std::fs::read(store.path()).unwrap();

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();

        prop_assert_eq!(loaded, tasks);
        prop_assert_eq!(std::fs::read(store.path()).unwrap(), first);
    }

    #[test]
    fn remove_drops_exactly_one(
        (tasks, index) in prop::collection::vec(arb_task(), 1..20)
            .prop_flat_map(|t| { let n = t.len(); (Just(t), 0..n) })
    ) {
        let (_dir, store) = make_store();
        store.save(&tasks).unwrap();

        let mut current = store.load().unwrap();
        let removed = store.remove(&mut current, index).unwrap();

        let mut expected = tasks.clone();
        let gone = expected.remove(index);
        prop_assert_eq!(removed, gone);
        prop_assert_eq!(store.load().unwrap(), expected);
    }

    #[test]
    fn selection_keeps_request_order(
        (tasks, indices) in prop::collection::vec(arb_task(), 1..10)
            .prop_flat_map(|t| {
                let n = t.len();
                (Just(t), prop::collection::vec(0..n, 1..15))
            })
    ) {
        let selection =
            PrintSessionBuilder::build_selection(&tasks, &indices, &HashMap::new()).unwrap();

        prop_assert_eq!(selection.list.len(), indices.len());
        prop_assert!(selection.skipped.is_empty());
        for (item, &index) in selection.list.iter().zip(&indices) {
            prop_assert_eq!(&item.task, &tasks[index]);
        }
    }

    #[test]
    fn load_never_panics_on_garbage(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let (_dir, store) = make_store();
        std::fs::write(store.path(), &bytes).unwrap();
        let _ = store.load();
    }
}
