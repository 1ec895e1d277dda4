//! Match highlighting
//!
//! Draws found boxes onto a screen image to check results by eye.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::config::OutputSettings;
use crate::geometry::ScreenRect;

/// Outline style for highlight rectangles
#[derive(Debug, Clone, Copy)]
pub struct HighlightStyle {
    pub color: Rgba<u8>,
    pub thickness: u32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::from(&OutputSettings::default())
    }
}

impl From<&OutputSettings> for HighlightStyle {
    fn from(settings: &OutputSettings) -> Self {
        Self {
            color: Rgba(settings.highlight_color),
            thickness: settings.highlight_thickness.max(1),
        }
    }
}

/// Outline `rects` on `image`
///
/// `origin` is the screen position of the image's top-left pixel. Boxes are
/// truncated to whole pixels; extra thickness grows outward.
pub fn draw_matches(
    image: &mut RgbaImage,
    origin: (i32, i32),
    rects: &[ScreenRect],
    style: HighlightStyle,
) {
    for rect in rects {
        let pixels = rect.to_pixels();
        if pixels.is_empty() {
            continue;
        }
        for inset in 0..style.thickness {
            let grow = inset as i32;
            let outline = Rect::at(pixels.x - origin.0 - grow, pixels.y - origin.1 - grow)
                .of_size(pixels.width + 2 * inset, pixels.height + 2 * inset);
            draw_hollow_rect_mut(image, outline, style.color);
        }
    }
}
