//! Human-mode end-to-end tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use snapdoc::capture::mock::solid_png;
use snapdoc::snapshot::{ImageFormat, Snapshot};

/// Write a session file holding `count` snapshots, as the session
/// would have persisted them.
pub fn seed_session(dir: &TempDir, count: usize) -> PathBuf {
    let urls: Vec<String> = (0..count)
        .map(|i| {
            let shade = u8::try_from((i * 50) % 256).unwrap();
            Snapshot::new(ImageFormat::Png, solid_png(8, 8, (shade, 120, 60))).to_data_url()
        })
        .collect();

    let path = dir.path().join("session.json");
    fs::write(
        &path,
        serde_json::to_string(&serde_json::json!({ "snapshots": urls })).unwrap(),
    )
    .unwrap();
    path
}

pub fn snapdoc(dir: &TempDir, session: &PathBuf, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("snapdoc").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--session")
        .arg(session)
        .arg("--config")
        .arg(dir.path().join("no-config.toml"))
        .args(args);
    cmd
}

#[test]
fn status_on_empty_session_shows_empty_state() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    snapdoc(&dir, &session, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No screenshots captured yet."));
}

#[test]
fn status_lists_one_line_per_snapshot() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, 2);

    snapdoc(&dir, &session, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 screenshots"))
        .stdout(predicate::str::contains("[1] image/png"))
        .stdout(predicate::str::contains("[2] image/png"));
}

#[test]
fn clear_prompts_and_aborts_on_no() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, 1);

    snapdoc(&dir, &session, &["clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted"));

    // Session untouched after an aborted clear.
    assert!(fs::read_to_string(&session).unwrap().contains("snapshots"));
}

#[test]
fn clear_with_yes_deletes_everything() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, 2);

    snapdoc(&dir, &session, &["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 screenshots"));

    assert!(!fs::read_to_string(&session).unwrap().contains("data:image"));
}

#[test]
fn export_on_empty_session_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");
    let out = dir.path().join("out");

    snapdoc(
        &dir,
        &session,
        &["export", "--out", out.to_str().unwrap()],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("Nothing to export"));

    assert!(!out.exists());
}

#[test]
fn export_writes_docx_and_resets_session() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, 2);
    let out = dir.path().join("out");

    snapdoc(
        &dir,
        &session,
        &[
            "export",
            "--title",
            "Run 1",
            "--size",
            "large",
            "--out",
            out.to_str().unwrap(),
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("Exported"));

    let docx: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".docx"))
        .collect();
    assert_eq!(docx.len(), 1);
    assert!(docx[0].starts_with("run_1_"));

    // Session resets after a successful export.
    assert!(!fs::read_to_string(&session).unwrap().contains("data:image"));
}

#[test]
fn export_rejects_unknown_size_option() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, 1);

    snapdoc(&dir, &session, &["export", "--size", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("huge"));

    // Session untouched by the rejected export.
    assert!(fs::read_to_string(&session).unwrap().contains("data:image"));
}

#[test]
fn version_prints_tool_name() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    snapdoc(&dir, &session, &["version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snapdoc"));
}

#[test]
fn completions_emit_shell_script() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    snapdoc(&dir, &session, &["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snapdoc"));
}
