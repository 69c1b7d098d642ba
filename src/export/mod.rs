//! Export request assembly and the document-exporter seam.
//!
//! The session hands an [`ExportRequest`] (title, generation timestamp and
//! ordered image blocks) to a [`DocumentExporter`], which turns it into a
//! downloadable [`Artifact`]. The binary document format lives entirely
//! behind that trait.

pub mod docx;

pub use docx::DocxExporter;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SnapError};
use crate::snapshot::Snapshot;

/// Title used when the user leaves the field blank.
pub const DEFAULT_TITLE: &str = "Test Run Snapshots";

/// Image size selection for exported documents.
///
/// The table is fixed; `medium` is the default.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SizeOption {
    /// 300x200 px
    Small,
    /// 500x300 px
    #[default]
    Medium,
    /// 700x450 px
    Large,
}

impl SizeOption {
    /// Fixed (width, height) in pixels for this option.
    #[must_use]
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Small => (300, 200),
            Self::Medium => (500, 300),
            Self::Large => (700, 450),
        }
    }

    /// Name as it appears in config files and CLI flags.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl FromStr for SizeOption {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(SnapError::InvalidSizeOption {
                value: other.to_string(),
            }),
        }
    }
}

/// User-facing export parameters.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Document title; blank or absent falls back to [`DEFAULT_TITLE`].
    pub title: Option<String>,
    /// Image size selection.
    pub size: SizeOption,
}

impl ExportOptions {
    /// Create options from an optional title and a size selection.
    #[must_use]
    pub fn new(title: Option<String>, size: SizeOption) -> Self {
        Self { title, size }
    }

    /// Effective document title after the blank fallback.
    #[must_use]
    pub fn effective_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_TITLE,
        }
    }
}

/// One image block of the export request.
#[derive(Debug, Clone)]
pub struct ImageBlock {
    /// Human-visible caption ("Screenshot N", 1-indexed).
    pub caption: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Rendered width in pixels.
    pub width: u32,
    /// Rendered height in pixels.
    pub height: u32,
}

/// Everything an exporter needs to produce the document.
///
/// Produced once per export action; never persisted.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Document title.
    pub title: String,
    /// Generation timestamp, also used for the artifact file name.
    pub generated_at: DateTime<Utc>,
    /// Image blocks in capture order.
    pub blocks: Vec<ImageBlock>,
}

impl ExportRequest {
    /// Build a request from the session's snapshots and export options.
    #[must_use]
    pub fn new(snapshots: &[Snapshot], options: &ExportOptions) -> Self {
        let (width, height) = options.size.dimensions();
        let blocks = snapshots
            .iter()
            .enumerate()
            .map(|(idx, snapshot)| ImageBlock {
                caption: format!("Screenshot {}", idx + 1),
                bytes: snapshot.bytes.clone(),
                width,
                height,
            })
            .collect();

        Self {
            title: options.effective_title().to_string(),
            generated_at: Utc::now(),
            blocks,
        }
    }

    /// Pin the generation timestamp (deterministic file names in tests).
    #[must_use]
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }
}

/// Finished document ready to hand to the download trigger.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Suggested file name, derived from the sanitized title and timestamp.
    pub file_name: String,
    /// Serialized document bytes.
    pub bytes: Vec<u8>,
}

/// Pure data-to-artifact transformation.
pub trait DocumentExporter {
    /// Serialize the request into a downloadable document.
    ///
    /// # Errors
    ///
    /// Returns an export error if assembly or serialization fails; the
    /// caller's session state must remain untouched in that case.
    fn export(&self, request: &ExportRequest) -> Result<Artifact>;
}

/// Derive the artifact file name: non-alphanumerics become underscores,
/// lower-cased, suffixed with the export timestamp.
#[must_use]
pub fn artifact_file_name(title: &str, generated_at: DateTime<Utc>) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}_{}.docx", generated_at.timestamp_millis())
}

/// Download trigger for a CLI: write the artifact into a directory.
pub fn save_artifact(artifact: &Artifact, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes)?;
    debug!(path = %path.display(), size_bytes = artifact.bytes.len(), "Artifact saved");
    Ok(path)
}
