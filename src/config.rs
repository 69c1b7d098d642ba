//! Configuration file handling.
//!
//! Reads `config.toml` from the user's config directory. A missing file
//! yields defaults; a file that exists but does not parse is an error the
//! user should see, not silently replaced.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SnapError};
use crate::export::SizeOption;

/// Browser viewport used by the capture backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// User configuration with defaults for every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapdocConfig {
    /// Document title used when none is given on the command line.
    pub default_title: Option<String>,
    /// Image size used when none is given on the command line.
    pub default_size: SizeOption,
    /// Bound on a single capture call, in seconds.
    pub capture_timeout_secs: Option<u64>,
    /// Page the capture backend navigates to.
    pub capture_url: Option<String>,
    /// Browser viewport for the capture backend.
    pub viewport: Viewport,
    /// Directory exported documents are saved into.
    pub output_dir: Option<PathBuf>,
    /// Session file override.
    pub session_file: Option<PathBuf>,
}

/// Standard config file location: `<config dir>/snapdoc/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("snapdoc").join("config.toml"))
}

impl SnapdocConfig {
    /// Load from the standard location, defaults when absent.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific path, defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents).map_err(|e| {
            SnapError::ConfigParse(format!("{}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }
}
