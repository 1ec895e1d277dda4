//! Pixel geometry
//!
//! Two coordinate spaces are in play: image-local (relative to the top-left
//! corner of a captured frame) and screen-global (desktop pixels). They are
//! separate types so that the only way from one to the other is an explicit
//! `translate` by the capture region's origin.

use serde::{Deserialize, Serialize};

/// Integer screen-global rectangle, used for capture regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Square region of side `size` centered on `(x, y)`
    pub fn centered(x: f64, y: f64, size: u32) -> Self {
        let half = size as f64 / 2.0;
        Self {
            x: (x - half) as i32,
            y: (y - half) as i32,
            width: size,
            height: size,
        }
    }

    /// Screen offset of the region's top-left corner
    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Rectangle in image-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Move into screen space by the capture region's origin
    pub fn translate(&self, (rx, ry): (i32, i32)) -> ScreenRect {
        ScreenRect {
            x: self.x + rx as f64,
            y: self.y + ry as f64,
            width: self.width,
            height: self.height,
        }
    }
}

/// Rectangle in screen-global pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Truncate to whole pixels
    pub fn to_pixels(&self) -> Region {
        Region {
            x: self.x as i32,
            y: self.y as i32,
            width: self.width as u32,
            height: self.height as u32,
        }
    }
}

/// Point in image-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImagePoint {
    pub x: f64,
    pub y: f64,
}

impl ImagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, (rx, ry): (i32, i32)) -> ScreenPoint {
        ScreenPoint::new(self.x + rx as f64, self.y + ry as f64)
    }
}

/// Point in screen-global pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &ScreenPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}
