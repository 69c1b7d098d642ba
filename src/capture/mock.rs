//! Mock host capability for unit testing.
//!
//! Records capture requests and supports canned frames, error injection
//! and artificial delays for timeout testing.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use snapdoc::capture::{CaptureRelay, MockTabCapture};
//!
//! let host = Arc::new(MockTabCapture::new());
//! let relay = CaptureRelay::new(host.clone());
//! let snapshot = relay.capture()?;
//! assert_eq!(host.request_count(), 1);
//! ```

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use tracing::trace;

use super::TabCapture;
use crate::error::{Result, SnapError};
use crate::snapshot::ImageFormat;

/// Encode a solid-color PNG, the mock's stand-in for a composited frame.
#[must_use]
pub fn solid_png(width: u32, height: u32, rgb: (u8, u8, u8)) -> Vec<u8> {
    let mut img = image::RgbImage::new(width, height);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb([rgb.0, rgb.1, rgb.2]);
    }

    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("in-memory PNG encode cannot fail");
    buf.into_inner()
}

/// Mock tab-capture host for testing without a browser.
pub struct MockTabCapture {
    frames: Mutex<VecDeque<Vec<u8>>>,
    default_frame: Vec<u8>,
    error_injection: Mutex<Option<SnapError>>,
    delay: Mutex<Option<Duration>>,
    request_log: Mutex<Vec<ImageFormat>>,
}

impl MockTabCapture {
    /// Create a mock that answers every request with the same small frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: Mutex::new(VecDeque::new()),
            default_frame: solid_png(8, 8, (32, 32, 32)),
            error_injection: Mutex::new(None),
            delay: Mutex::new(None),
            request_log: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that serves the given frames in order, then falls back
    /// to the default frame.
    #[must_use]
    pub fn with_frames(frames: Vec<Vec<u8>>) -> Self {
        let mock = Self::new();
        *mock.frames.lock().unwrap() = frames.into();
        mock
    }

    /// Inject an error for the next capture request.
    pub fn inject_error(&self, error: SnapError) {
        *self.error_injection.lock().unwrap() = Some(error);
    }

    /// Delay every response, for timeout tests.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Number of capture requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_log.lock().unwrap().len()
    }

    /// Formats requested, in order.
    #[must_use]
    pub fn requested_formats(&self) -> Vec<ImageFormat> {
        self.request_log.lock().unwrap().clone()
    }
}

impl Default for MockTabCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl TabCapture for MockTabCapture {
    fn request_visible_tab_image(&self, format: ImageFormat) -> Result<Vec<u8>> {
        trace!(%format, "Mock capture request");
        self.request_log.lock().unwrap().push(format);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        if let Some(error) = self.error_injection.lock().unwrap().take() {
            return Err(error);
        }

        let frame = self.frames.lock().unwrap().pop_front();
        Ok(frame.unwrap_or_else(|| self.default_frame.clone()))
    }
}
