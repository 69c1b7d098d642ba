//! End-to-end session workflow tests.
//!
//! Drives the session state machine through the mock capture host and the
//! recording exporter: ordered captures, export-resets, retry after
//! exporter failure, restore-on-open, and clear semantics.

use std::sync::Arc;

use snapdoc::capture::{CaptureRelay, MockTabCapture, SharedTabCapture};
use snapdoc::error::SnapError;
use snapdoc::export::{ExportOptions, SizeOption};
use snapdoc::session::{
    FileStore, MemoryStore, SNAPSHOTS_KEY, SessionStore, SnapshotSession,
};

use crate::common::init_test_logging;
use crate::common::mocks::{RecordingExporter, colored_frames};

fn mock_relay(frames: Vec<Vec<u8>>) -> CaptureRelay {
    CaptureRelay::new(Arc::new(MockTabCapture::with_frames(frames)) as SharedTabCapture)
}

// ===== Capture Ordering =====

#[test]
fn capture_count_and_order_match_calls() {
    init_test_logging();
    let frames = colored_frames(3);
    let relay = mock_relay(frames.clone());
    let mut session = SnapshotSession::restore(MemoryStore::new());

    for _ in 0..3 {
        session.capture(&relay).unwrap();
    }

    assert_eq!(session.len(), 3);
    for (idx, snapshot) in session.snapshots().iter().enumerate() {
        assert_eq!(snapshot.bytes, frames[idx]);
    }
}

// ===== Export Scenarios =====

#[test]
fn export_three_large_resets_session() {
    init_test_logging();
    let relay = mock_relay(colored_frames(3));
    let mut session = SnapshotSession::restore(MemoryStore::new());
    for _ in 0..3 {
        session.capture(&relay).unwrap();
    }

    let exporter = RecordingExporter::new();
    let options = ExportOptions::new(Some("Run 1".to_string()), SizeOption::Large);
    let artifact = session.export(&options, &exporter).unwrap();

    assert!(artifact.is_some());
    assert!(session.is_empty());

    let request = exporter.single_request();
    assert_eq!(request.title, "Run 1");
    assert_eq!(request.captions, vec!["Screenshot 1", "Screenshot 2", "Screenshot 3"]);
    assert!(request.dimensions.iter().all(|&d| d == (700, 450)));
}

#[test]
fn export_failure_keeps_snapshots_then_retry_succeeds() {
    init_test_logging();
    let relay = mock_relay(colored_frames(1));
    let mut session = SnapshotSession::restore(MemoryStore::new());
    session.capture(&relay).unwrap();

    let exporter = RecordingExporter::new();
    exporter.fail_next(1);
    let options = ExportOptions::new(None, SizeOption::Medium);

    assert!(matches!(
        session.export(&options, &exporter),
        Err(SnapError::ExportFailed(_))
    ));
    assert_eq!(session.len(), 1);

    let artifact = session.export(&options, &exporter).unwrap();
    assert!(artifact.is_some());
    assert!(session.is_empty());
    assert_eq!(exporter.single_request().captions, vec!["Screenshot 1"]);
}

#[test]
fn export_blocks_preserve_capture_order() {
    init_test_logging();
    let frames = colored_frames(4);
    let relay = mock_relay(frames.clone());
    let mut session = SnapshotSession::restore(MemoryStore::new());
    for _ in 0..4 {
        session.capture(&relay).unwrap();
    }

    let exporter = RecordingExporter::new();
    session
        .export(&ExportOptions::new(None, SizeOption::Small), &exporter)
        .unwrap();

    assert_eq!(exporter.single_request().block_bytes, frames);
}

#[test]
fn export_from_empty_session_is_noop() {
    init_test_logging();
    let mut session = SnapshotSession::restore(MemoryStore::new());
    let exporter = RecordingExporter::new();

    let artifact = session
        .export(&ExportOptions::new(None, SizeOption::Medium), &exporter)
        .unwrap();

    assert!(artifact.is_none());
    assert!(exporter.requests().is_empty());
    assert!(session.is_empty());
}

#[test]
fn unknown_size_option_fails_before_touching_session() {
    init_test_logging();
    let relay = mock_relay(colored_frames(1));
    let mut session = SnapshotSession::restore(MemoryStore::new());
    session.capture(&relay).unwrap();

    // Size strings are validated at the edge; "huge" never reaches export.
    let parsed: Result<SizeOption, _> = "huge".parse();
    assert!(matches!(
        parsed,
        Err(SnapError::InvalidSizeOption { value }) if value == "huge"
    ));
    assert_eq!(session.len(), 1);
}

// ===== Persistence Round Trips =====

#[test]
fn session_survives_reopen_through_file_store() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let relay = mock_relay(colored_frames(2));
        let mut session = SnapshotSession::restore(FileStore::open(&path));
        session.capture(&relay).unwrap();
        session.capture(&relay).unwrap();
    }

    let restored = SnapshotSession::restore(FileStore::open(&path));
    assert_eq!(restored.len(), 2);
}

#[test]
fn restore_of_corrupt_session_file_degrades_to_empty() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{broken").unwrap();

    let session = SnapshotSession::restore(FileStore::open(&path));
    assert!(session.is_empty());
}

#[test]
fn persisted_copy_converges_after_each_mutation() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let relay = mock_relay(colored_frames(2));
    let mut session = SnapshotSession::restore(FileStore::open(&path));

    session.capture(&relay).unwrap();
    assert_eq!(persisted_count(&path), Some(1));

    session.capture(&relay).unwrap();
    assert_eq!(persisted_count(&path), Some(2));

    session.clear().unwrap();
    assert_eq!(persisted_count(&path), None);
}

#[test]
fn export_erases_persisted_copy_like_clear() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let relay = mock_relay(colored_frames(1));
    let mut session = SnapshotSession::restore(FileStore::open(&path));
    session.capture(&relay).unwrap();

    let exporter = RecordingExporter::new();
    session
        .export(&ExportOptions::new(None, SizeOption::Medium), &exporter)
        .unwrap();

    assert_eq!(persisted_count(&path), None);
}

#[test]
fn clear_twice_equals_clear_once() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let relay = mock_relay(colored_frames(1));
    let mut session = SnapshotSession::restore(FileStore::open(&path));
    session.capture(&relay).unwrap();

    session.clear().unwrap();
    session.clear().unwrap();

    assert!(session.is_empty());
    assert_eq!(persisted_count(&path), None);
}

fn persisted_count(path: &std::path::Path) -> Option<usize> {
    let store = FileStore::open(path);
    store
        .get(SNAPSHOTS_KEY)
        .unwrap()
        .map(|v| v.as_array().unwrap().len())
}
