//! Frame data structures for captured screen content

use image::RgbaImage;
use std::time::Instant;

use crate::geometry::Region;

/// A captured frame from the screen
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// RGBA pixels, `region.width` x `region.height`
    pub image: RgbaImage,
    /// Screen region the frame was taken from
    pub region: Region,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Create a new captured frame
    pub fn new(image: RgbaImage, region: Region) -> Self {
        Self {
            image,
            region,
            timestamp: Instant::now(),
        }
    }

    /// Screen offset of the frame's top-left pixel
    pub fn origin(&self) -> (i32, i32) {
        self.region.origin()
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
