//! Snapshot session: the stateful owner of the ordered capture list.
//!
//! The session is either `Empty` or holds `n >= 1` snapshots in capture
//! order. Every mutating operation keeps the persisted copy converged with
//! the in-memory list; the persisted copy exists only so the list survives
//! re-invocation, it is never a second source of truth.
//!
//! Mutating operations take `&mut self`, so no two of them can be in
//! flight against the same session.

pub mod store;

pub use store::{FileStore, MemoryStore, SessionStore, default_session_path};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::capture::CaptureRelay;
use crate::error::{Result, SnapError};
use crate::export::{Artifact, DocumentExporter, ExportOptions, ExportRequest};
use crate::snapshot::Snapshot;

/// Well-known store key for the persisted snapshot list.
pub const SNAPSHOTS_KEY: &str = "snapshots";

/// Ordered snapshot list for one session, backed by an injected store.
pub struct SnapshotSession<S: SessionStore> {
    snapshots: Vec<Snapshot>,
    store: S,
}

impl<S: SessionStore> SnapshotSession<S> {
    /// Start a session from whatever the store holds.
    ///
    /// A missing entry yields an empty session. A store read failure or an
    /// undecodable entry also degrades to an empty session with a warning
    /// rather than failing the open.
    pub fn restore(store: S) -> Self {
        let snapshots = match store.get(SNAPSHOTS_KEY) {
            Ok(Some(value)) => match Self::decode_list(value) {
                Ok(list) => list,
                Err(e) => {
                    warn!(error = %e, "Discarding undecodable persisted session");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Session store unreadable, starting empty");
                Vec::new()
            }
        };

        if !snapshots.is_empty() {
            info!(count = snapshots.len(), "Restored persisted session");
        }

        Self { snapshots, store }
    }

    fn decode_list(value: Value) -> Result<Vec<Snapshot>> {
        serde_json::from_value(value)
            .map_err(|e| SnapError::Persistence(format!("invalid snapshot list: {e}")))
    }

    /// Number of snapshots held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when the session holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots in capture order.
    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Capture one snapshot through the relay and append it.
    ///
    /// On relay failure the session is unchanged; there is no partial
    /// append. On persist failure the in-memory append stands and the
    /// store error is surfaced, since the durability guarantee is broken
    /// even though the capture itself succeeded.
    pub fn capture(&mut self, relay: &CaptureRelay) -> Result<&Snapshot> {
        let snapshot = relay.capture()?;
        self.snapshots.push(snapshot);
        debug!(count = self.snapshots.len(), "Snapshot appended");

        self.persist()?;
        Ok(self.snapshots.last().expect("list is non-empty after push"))
    }

    /// Drop all snapshots, erasing the persisted copy first.
    ///
    /// Idempotent; a no-op from an empty session still leaves the store
    /// erased. Callers gate this behind user confirmation; the session
    /// only ever clears when explicitly invoked.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(SNAPSHOTS_KEY)?;
        let removed = self.snapshots.len();
        self.snapshots.clear();
        if removed > 0 {
            info!(removed, "Session cleared");
        }
        Ok(())
    }

    /// Export all snapshots as a document and reset the session.
    ///
    /// From an empty session this is a no-op returning `Ok(None)`; no
    /// degenerate empty document is produced. On exporter failure the
    /// snapshots are retained for retry. On success the session resets
    /// exactly as [`clear`](Self::clear) does and the artifact is returned.
    pub fn export(
        &mut self,
        options: &ExportOptions,
        exporter: &dyn DocumentExporter,
    ) -> Result<Option<Artifact>> {
        if self.snapshots.is_empty() {
            debug!("Export requested on empty session, skipping");
            return Ok(None);
        }

        let request = ExportRequest::new(&self.snapshots, options);
        let artifact = exporter.export(&request)?;

        self.store.remove(SNAPSHOTS_KEY)?;
        let exported = self.snapshots.len();
        self.snapshots.clear();
        info!(exported, file_name = %artifact.file_name, "Session exported");

        Ok(Some(artifact))
    }

    fn persist(&mut self) -> Result<()> {
        let value = serde_json::to_value(&self.snapshots)
            .map_err(|e| SnapError::Persistence(format!("failed to encode snapshots: {e}")))?;
        self.store.set(SNAPSHOTS_KEY, value)
    }
}
