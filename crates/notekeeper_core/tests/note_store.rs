use chrono::Utc;
use notekeeper_core::{MemoryNoteStore, NoteId, NoteStore, StoreError};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn create_and_get_roundtrip() {
    let store = MemoryNoteStore::new();
    let before = Utc::now();

    let id = store.create("Groceries", "Milk");
    let loaded = store.get(id).unwrap();

    assert_eq!(id.to_string(), "1");
    assert_eq!(loaded.title, "Groceries");
    assert_eq!(loaded.description, "Milk");
    assert!(loaded.created_on >= before);
}

#[test]
fn sequential_creates_yield_distinct_increasing_ids() {
    let store = MemoryNoteStore::new();
    let ids = (0..25)
        .map(|idx| store.create(&format!("note {idx}"), ""))
        .collect::<Vec<_>>();

    let unique = ids.iter().copied().collect::<HashSet<_>>();
    assert_eq!(unique.len(), ids.len());
    for (idx, id) in ids.iter().enumerate() {
        assert_eq!(id.get(), idx as u64 + 1);
    }
}

#[test]
fn concurrent_creates_never_share_an_id() {
    let store = Arc::new(MemoryNoteStore::new());
    let handles = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..50)
                    .map(|idx| store.create(&format!("w{worker}-{idx}"), ""))
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    let mut all = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(all.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(all.len(), 400);
    assert_eq!(store.len(), 400);
}

#[test]
fn replace_missing_leaves_store_unchanged() {
    let store = MemoryNoteStore::new();
    let id = store.create("keep", "me");
    let before = store.list();

    let err = store.replace(NoteId::new(99), "x", "y").unwrap_err();

    assert_eq!(err, StoreError::NotFound(NoteId::new(99)));
    assert_eq!(store.list(), before);
    assert_eq!(store.get(id).unwrap().title, "keep");
}

#[test]
fn replace_overwrites_fields_and_keeps_created_on() {
    let store = MemoryNoteStore::new();
    let id = store.create("draft", "first body");
    let created_on = store.get(id).unwrap().created_on;

    store.replace(id, "final", "second body").unwrap();

    let loaded = store.get(id).unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.description, "second body");
    assert_eq!(loaded.created_on, created_on);
}

#[test]
fn delete_removes_and_second_delete_reports_not_found() {
    let store = MemoryNoteStore::new();
    let id = store.create("temp", "");

    store.delete(id).unwrap();

    assert_eq!(store.get(id).unwrap_err(), StoreError::NotFound(id));
    assert_eq!(store.delete(id).unwrap_err(), StoreError::NotFound(id));
    assert!(store.is_empty());
}

#[test]
fn list_after_deleting_middle_entry_returns_remaining_ids_in_order() {
    let store = MemoryNoteStore::new();
    store.create("one", "");
    let second = store.create("two", "");
    store.create("three", "");

    store.delete(second).unwrap();

    let ids = store
        .list()
        .into_iter()
        .map(|entry| entry.id.to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["1".to_string(), "3".to_string()]);
}

#[test]
fn store_error_message_names_the_id() {
    let err = StoreError::NotFound(NoteId::new(7));
    assert_eq!(err.to_string(), "note not found: 7");
}
