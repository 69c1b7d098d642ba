//! Output mode abstraction for robot and human rendering of session state.
//!
//! The CLI's user surface: it renders one thumbnail line per snapshot in
//! capture order, the live count, and the results of capture/clear/export
//! actions.

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

use std::path::Path;

use crate::snapshot::Snapshot;

/// Render surface for session state and action results.
pub trait SessionOutput {
    /// Render the whole session: count plus one line per snapshot.
    fn session_summary(&self, snapshots: &[Snapshot]);

    /// A new snapshot was appended at `ordinal` (1-indexed); `total` is the
    /// new session length.
    fn snapshot_captured(&self, ordinal: usize, snapshot: &Snapshot, total: usize);

    /// The session was cleared, dropping `removed` snapshots.
    fn session_cleared(&self, removed: usize);

    /// An export finished; the artifact was saved at `path`.
    fn export_complete(&self, path: &Path, blocks: usize);

    /// Export was requested on an empty session and skipped.
    fn export_skipped_empty(&self);
}

/// Live count label, pluralized.
#[must_use]
pub fn count_label(count: usize) -> String {
    format!("{count} screenshot{}", if count == 1 { "" } else { "s" })
}

/// Human-readable size for thumbnail lines.
#[must_use]
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
