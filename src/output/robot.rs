//! Machine-readable JSON output for scripts and agents.

use std::path::Path;

use serde::Serialize;

use super::SessionOutput;
use crate::snapshot::Snapshot;

/// JSON-lines output implementation.
pub struct RobotOutput {
    compact: bool,
}

impl RobotOutput {
    #[must_use]
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    fn emit<T: Serialize>(&self, value: &T) {
        let json = if self.compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        };
        // Serialization of these plain data structs cannot fail.
        println!("{}", json.expect("robot output serialization"));
    }
}

#[derive(Serialize)]
struct SnapshotLine {
    ordinal: usize,
    format: String,
    size_bytes: usize,
}

#[derive(Serialize)]
struct SummaryEvent {
    event: &'static str,
    count: usize,
    snapshots: Vec<SnapshotLine>,
}

#[derive(Serialize)]
struct CapturedEvent {
    event: &'static str,
    ordinal: usize,
    size_bytes: usize,
    count: usize,
    ok: bool,
}

#[derive(Serialize)]
struct ClearedEvent {
    event: &'static str,
    removed: usize,
    ok: bool,
}

#[derive(Serialize)]
struct ExportedEvent {
    event: &'static str,
    path: String,
    blocks: usize,
    ok: bool,
}

#[derive(Serialize)]
struct SkippedEvent {
    event: &'static str,
    reason: &'static str,
    ok: bool,
}

impl SessionOutput for RobotOutput {
    fn session_summary(&self, snapshots: &[Snapshot]) {
        self.emit(&SummaryEvent {
            event: "summary",
            count: snapshots.len(),
            snapshots: snapshots
                .iter()
                .enumerate()
                .map(|(idx, s)| SnapshotLine {
                    ordinal: idx + 1,
                    format: s.format.to_string(),
                    size_bytes: s.size_bytes(),
                })
                .collect(),
        });
    }

    fn snapshot_captured(&self, ordinal: usize, snapshot: &Snapshot, total: usize) {
        self.emit(&CapturedEvent {
            event: "captured",
            ordinal,
            size_bytes: snapshot.size_bytes(),
            count: total,
            ok: true,
        });
    }

    fn session_cleared(&self, removed: usize) {
        self.emit(&ClearedEvent {
            event: "cleared",
            removed,
            ok: true,
        });
    }

    fn export_complete(&self, path: &Path, blocks: usize) {
        self.emit(&ExportedEvent {
            event: "exported",
            path: path.display().to_string(),
            blocks,
            ok: true,
        });
    }

    fn export_skipped_empty(&self) {
        self.emit(&SkippedEvent {
            event: "export_skipped",
            reason: "session is empty",
            ok: true,
        });
    }
}
