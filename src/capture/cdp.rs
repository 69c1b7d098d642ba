//! Headless-Chrome host capability (Chrome DevTools Protocol).
//!
//! Launches a headless browser, navigates its tab to the configured page
//! and serves `Page.captureScreenshot` frames as the visible-tab image.

use std::sync::Arc;

use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use tracing::{debug, info};

use super::TabCapture;
use crate::error::{Result, SnapError};
use crate::snapshot::ImageFormat;

/// CDP-backed tab capture host.
///
/// Keeps the browser process alive for the lifetime of the value so
/// repeated captures within one command hit the same tab.
pub struct CdpTabCapture {
    // Dropping the browser terminates the child process; held for lifetime.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl CdpTabCapture {
    /// Launch a headless browser and navigate its tab to `url`.
    ///
    /// # Errors
    ///
    /// Returns a capture error if the browser cannot be launched or the
    /// navigation does not settle.
    pub fn launch(url: &str, viewport: (u32, u32)) -> Result<Self> {
        debug!(url, ?viewport, "Launching headless browser");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some(viewport))
            .build()
            .map_err(|e| SnapError::CaptureFailed {
                reason: format!("failed to build launch options: {e}"),
            })?;

        let browser = Browser::new(options).map_err(|e| SnapError::CaptureFailed {
            reason: format!("failed to launch browser: {e}"),
        })?;

        let tab = browser.new_tab().map_err(|e| SnapError::CaptureFailed {
            reason: format!("failed to create tab: {e}"),
        })?;

        tab.navigate_to(url).map_err(|e| SnapError::CaptureFailed {
            reason: format!("navigation failed: {e}"),
        })?;
        tab.wait_until_navigated().map_err(|e| SnapError::CaptureFailed {
            reason: format!("wait for navigation failed: {e}"),
        })?;

        info!(url, "Tab ready for capture");
        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl TabCapture for CdpTabCapture {
    fn request_visible_tab_image(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let cdp_format = match format {
            ImageFormat::Png => Page::CaptureScreenshotFormatOption::Png,
            ImageFormat::Jpeg => Page::CaptureScreenshotFormatOption::Jpeg,
        };

        self.tab
            .capture_screenshot(cdp_format, None, None, true)
            .map_err(|e| SnapError::CaptureFailed {
                reason: format!("screenshot failed: {e}"),
            })
    }
}
