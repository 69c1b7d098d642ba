//! Capture relay and host capture capability.
//!
//! This module provides a trait-based abstraction over the host that can
//! read pixel data from the active tab, enabling testability without a
//! browser. The [`CaptureRelay`] is stateless: one request in, one image
//! out, with a bounded wait so a silent host cannot hang the caller.

#[cfg(feature = "cdp")]
pub mod cdp;
pub mod mock;

#[cfg(feature = "cdp")]
pub use cdp::CdpTabCapture;
pub use mock::MockTabCapture;

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::error::{Result, SnapError};
use crate::snapshot::{ImageFormat, Snapshot};

/// Host capability for reading pixel data from the currently visible tab.
///
/// Implementations must be `Send + Sync`: the relay issues the request on a
/// worker thread so it can bound the wait.
pub trait TabCapture: Send + Sync {
    /// Request a single still image of the visible tab content.
    ///
    /// # Errors
    ///
    /// Returns an error if the host denies permission, has no active tab,
    /// or the encode fails.
    fn request_visible_tab_image(&self, format: ImageFormat) -> Result<Vec<u8>>;
}

/// Type alias for a shared host capability.
pub type SharedTabCapture = Arc<dyn TabCapture>;

/// Relays capture requests to the host and returns finished snapshots.
///
/// The relay performs no retries and holds no session state; failures are
/// surfaced to the caller undecorated. The only policy it owns is the
/// timeout: a host call that neither completes nor fails within the bound
/// is reported as a capture error instead of hanging forever.
pub struct CaptureRelay {
    host: SharedTabCapture,
    timeout: Duration,
}

impl CaptureRelay {
    /// Default bound on a single host capture call.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a relay over the given host capability.
    #[must_use]
    pub fn new(host: SharedTabCapture) -> Self {
        Self {
            host,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Override the capture timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Capture one snapshot of the visible tab as lossless PNG.
    ///
    /// # Errors
    ///
    /// Returns a capture error if the host fails, returns non-image data,
    /// or does not answer within the configured timeout.
    pub fn capture(&self) -> Result<Snapshot> {
        let format = ImageFormat::Png;
        trace!(%format, timeout_secs = self.timeout.as_secs(), "Requesting tab image");

        let host = Arc::clone(&self.host);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may have timed out and gone away; a failed send
            // just means nobody is waiting for this frame anymore.
            let _ = tx.send(host.request_visible_tab_image(format));
        });

        let bytes = match rx.recv_timeout(self.timeout) {
            Ok(result) => result?,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Capture timed out");
                return Err(SnapError::CaptureTimeout {
                    secs: self.timeout.as_secs(),
                });
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(SnapError::CaptureFailed {
                    reason: "capture worker exited without a response".to_string(),
                });
            }
        };

        // The host contract is encoded image data; reject anything the
        // image decoder cannot even identify.
        image::guess_format(&bytes).map_err(|e| SnapError::CaptureFailed {
            reason: format!("host returned non-image data: {e}"),
        })?;

        debug!(size_bytes = bytes.len(), "Capture complete");
        Ok(Snapshot::new(format, bytes))
    }
}
