//! File-backed session store semantics.

use snapdoc::session::{FileStore, SessionStore};

use crate::common::init_test_logging;

#[test]
fn set_get_remove_round_trip() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("session.json"));

    assert_eq!(store.get("snapshots").unwrap(), None);

    store
        .set("snapshots", serde_json::json!(["data:image/png;base64,AA=="]))
        .unwrap();
    assert!(store.get("snapshots").unwrap().is_some());

    store.remove("snapshots").unwrap();
    assert_eq!(store.get("snapshots").unwrap(), None);
}

#[test]
fn set_creates_missing_parent_directories() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("session.json");
    let mut store = FileStore::open(&path);

    store.set("snapshots", serde_json::json!([])).unwrap();
    assert!(path.exists());
}

#[test]
fn set_is_a_flat_overwrite() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("session.json"));

    store.set("snapshots", serde_json::json!(["a", "b"])).unwrap();
    store.set("snapshots", serde_json::json!(["c"])).unwrap();

    assert_eq!(
        store.get("snapshots").unwrap(),
        Some(serde_json::json!(["c"]))
    );
}

#[test]
fn unrelated_keys_survive_removal() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("session.json"));

    store.set("snapshots", serde_json::json!(["a"])).unwrap();
    store.set("other", serde_json::json!(42)).unwrap();
    store.remove("snapshots").unwrap();

    assert_eq!(store.get("other").unwrap(), Some(serde_json::json!(42)));
}

#[test]
fn no_stray_temp_file_after_commit() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let mut store = FileStore::open(&path);

    store.set("snapshots", serde_json::json!([])).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}
