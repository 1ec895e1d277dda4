//! Screen Capture Layer
//!
//! Capture is a read-only collaborator: it returns the pixels of a screen
//! region and nothing else. Backends implement [`ScreenCapture`].

pub mod frame;
pub mod screenshot_file;

use async_trait::async_trait;

use crate::error::CaptureError;
use crate::geometry::Region;

pub use frame::CapturedFrame;
pub use screenshot_file::ScreenshotFileCapture;

/// Screen capture seam
#[async_trait]
pub trait ScreenCapture: Send + Sync {
    /// Capture the pixels of a screen-global region
    async fn capture(&self, region: Region) -> Result<CapturedFrame, CaptureError>;
}

#[async_trait]
impl<T: ScreenCapture + ?Sized> ScreenCapture for Box<T> {
    async fn capture(&self, region: Region) -> Result<CapturedFrame, CaptureError> {
        (**self).capture(region).await
    }
}
