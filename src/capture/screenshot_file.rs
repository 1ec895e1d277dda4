//! Screenshot-backed capture
//!
//! Treats a saved screenshot as the desktop. Useful for repeatable searches
//! and for machines where live capture is not available.

use async_trait::async_trait;
use image::{imageops, RgbaImage};
use std::path::Path;
use tracing::debug;

use crate::error::CaptureError;
use crate::geometry::Region;

use super::{CapturedFrame, ScreenCapture};

/// Captures regions out of a stored screen image
#[derive(Debug, Clone)]
pub struct ScreenshotFileCapture {
    screen: RgbaImage,
    /// Screen position of the image's top-left pixel
    origin: (i32, i32),
}

impl ScreenshotFileCapture {
    pub fn new(screen: RgbaImage) -> Self {
        Self::with_origin(screen, (0, 0))
    }

    /// Screen image whose top-left pixel sits at `origin` on the desktop
    pub fn with_origin(screen: RgbaImage, origin: (i32, i32)) -> Self {
        Self { screen, origin }
    }

    /// Load a screenshot from disk
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let screen = image::open(path)?.to_rgba8();
        debug!("Loaded {}x{} screenshot from {:?}", screen.width(), screen.height(), path);
        Ok(Self::new(screen))
    }

    pub fn screen(&self) -> &RgbaImage {
        &self.screen
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// The whole screenshot as a screen region
    pub fn bounds(&self) -> Region {
        Region::new(self.origin.0, self.origin.1, self.screen.width(), self.screen.height())
    }

    /// Copy `region` out of the screenshot
    ///
    /// Pixels of a partially off-screen region that fall outside the
    /// screenshot are left transparent black.
    pub fn crop(&self, region: Region) -> Result<CapturedFrame, CaptureError> {
        if region.is_empty() {
            return Err(CaptureError::InvalidRegion(region));
        }

        // region position relative to the screenshot
        let left = region.x as i64 - self.origin.0 as i64;
        let top = region.y as i64 - self.origin.1 as i64;
        let right = left + region.width as i64;
        let bottom = top + region.height as i64;
        if right <= 0
            || bottom <= 0
            || left >= self.screen.width() as i64
            || top >= self.screen.height() as i64
        {
            return Err(CaptureError::OffScreen(region));
        }

        let mut image = RgbaImage::new(region.width, region.height);
        imageops::replace(&mut image, &self.screen, -left, -top);
        Ok(CapturedFrame::new(image, region))
    }
}

#[async_trait]
impl ScreenCapture for ScreenshotFileCapture {
    async fn capture(&self, region: Region) -> Result<CapturedFrame, CaptureError> {
        self.crop(region)
    }
}
