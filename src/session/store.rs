//! Ephemeral session store backends.
//!
//! Key-value persistence scoped to one UI session, used purely so captured
//! snapshots survive re-invocation. Values are JSON; the session writes the
//! whole snapshot list under a single well-known key, flat overwrite.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Result, SnapError};

/// Key-value persistence scoped to the session lifetime.
pub trait SessionStore {
    /// Read a value, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Erase a value. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for tests and single-process use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON object per session file.
///
/// Lives in the user's runtime directory (temp dir as a fallback), so the
/// contents are gone with the session, not preserved like real user data.
/// Writes go through a temp file and rename, so a reader never observes a
/// partially written store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at the given path. The file is created lazily on the
    /// first write.
    #[must_use]
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "Opening session store");
        Self { path }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, Value>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            SnapError::Persistence(format!("failed to read {}: {e}", self.path.display()))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            SnapError::Persistence(format!("corrupt session file {}: {e}", self.path.display()))
        })
    }

    fn write_entries(&self, entries: &HashMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SnapError::Persistence(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let contents = serde_json::to_string(entries)
            .map_err(|e| SnapError::Persistence(format!("failed to encode session: {e}")))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).map_err(|e| {
            SnapError::Persistence(format!("failed to write {}: {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            SnapError::Persistence(format!("failed to commit {}: {e}", self.path.display()))
        })?;

        trace!(path = %self.path.display(), "Session store committed");
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Default session file location.
///
/// Runtime dir keeps the store session-scoped on systems that clean it up;
/// elsewhere the temp dir serves the same purpose.
#[must_use]
pub fn default_session_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("snapdoc")
        .join("session.json")
}
