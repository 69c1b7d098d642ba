//! Human-friendly terminal output.

use std::path::Path;

use colored::Colorize;

use super::{SessionOutput, count_label, format_size};
use crate::snapshot::Snapshot;

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    quiet: bool,
}

impl HumanOutput {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl SessionOutput for HumanOutput {
    fn session_summary(&self, snapshots: &[Snapshot]) {
        if snapshots.is_empty() {
            println!("{}", "No screenshots captured yet.".yellow());
            println!("Run {} to get started!", "snapdoc capture".green());
            return;
        }

        println!("{}", count_label(snapshots.len()).bold());
        for (idx, snapshot) in snapshots.iter().enumerate() {
            println!(
                "  [{}] {} ({})",
                (idx + 1).to_string().cyan(),
                snapshot.format,
                format_size(snapshot.size_bytes())
            );
        }
    }

    fn snapshot_captured(&self, ordinal: usize, snapshot: &Snapshot, total: usize) {
        if self.quiet {
            return;
        }
        println!(
            "{} screenshot {} ({}), {}",
            "Captured".green().bold(),
            ordinal,
            format_size(snapshot.size_bytes()),
            count_label(total)
        );
    }

    fn session_cleared(&self, removed: usize) {
        if self.quiet {
            return;
        }
        if removed == 0 {
            println!("Session already empty");
        } else {
            println!("{} {}", "Deleted".yellow().bold(), count_label(removed));
        }
    }

    fn export_complete(&self, path: &Path, blocks: usize) {
        if self.quiet {
            return;
        }
        println!(
            "{} {} with {} to {}",
            "Exported".green().bold(),
            "document".bold(),
            count_label(blocks),
            path.display().to_string().cyan()
        );
    }

    fn export_skipped_empty(&self) {
        println!("{}", "Nothing to export: session is empty".yellow());
    }
}
