//! Error types for snapdoc operations.

use thiserror::Error;

/// Primary error type for capture, session and export operations.
#[derive(Error, Debug)]
pub enum SnapError {
    // Capture errors
    #[error("Capture failed: {reason}")]
    CaptureFailed { reason: String },

    #[error("Capture did not complete within {secs}s")]
    CaptureTimeout { secs: u64 },

    #[error("No capture backend available in this build")]
    NoCaptureBackend,

    #[error("No capture URL configured")]
    NoCaptureUrl,

    // Configuration errors
    #[error("Unrecognized size option '{value}'")]
    InvalidSizeOption { value: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Confirmation required to delete all screenshots")]
    ConfirmationRequired,

    // Export errors
    #[error("Document export failed: {0}")]
    ExportFailed(String),

    // Session store errors
    #[error("Session store error: {0}")]
    Persistence(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl SnapError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CaptureTimeout { .. }
                | Self::NoCaptureBackend
                | Self::NoCaptureUrl
                | Self::InvalidSizeOption { .. }
                | Self::ConfirmationRequired
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::CaptureTimeout { .. } => Some("Raise --timeout or check that the browser responds"),
            Self::NoCaptureBackend => Some("Rebuild with --features cdp"),
            Self::NoCaptureUrl => Some("Pass --url or set capture_url in config.toml"),
            Self::InvalidSizeOption { .. } => Some("Use one of: small, medium, large"),
            Self::ConfirmationRequired => Some("Re-run with --yes to confirm"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using SnapError.
pub type Result<T> = std::result::Result<T, SnapError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| SnapError::Other(format!("{}: {e}", f().into())))
    }
}
