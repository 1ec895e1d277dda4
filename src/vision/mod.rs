//! Vision/OCR Layer
//!
//! Turns OCR output into matchable words and locates them:
//! - segmentation of recognized runs into candidate words
//! - fuzzy scoring of words against a query
//! - monospace projection of words back to pixel boxes
//! - selection of all matches or the one nearest a point
//!
//! OCR itself happens behind the [`TextRecognizer`] trait. Backends:
//! - Windows OCR API (Windows only)
//! - Replay of recorded OCR runs from JSON

pub mod fuzzy;
pub mod projection;
pub mod replay_ocr;
pub mod segment;
pub mod selector;
#[cfg(windows)]
pub mod windows_ocr;

use async_trait::async_trait;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;
use crate::geometry::ImageRect;

pub use fuzzy::{FuzzyMatcher, ScoredMatch, Scorer};
pub use projection::{project, project_point};
pub use replay_ocr::ReplayRecognizer;
pub use segment::{Word, WordSegmenter};
pub use selector::SpatialSelector;
#[cfg(windows)]
pub use windows_ocr::WindowsOcr;

/// One contiguous text detection reported by an OCR engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedRun {
    /// Recognized text
    pub text: String,
    /// Bounding box in image-local coordinates
    pub bounding_box: ImageRect,
}

impl RecognizedRun {
    pub fn new(text: impl Into<String>, bounding_box: ImageRect) -> Self {
        Self {
            text: text.into(),
            bounding_box,
        }
    }

    /// Length of the text in characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// OCR engine seam
///
/// "No text" is an empty result, not an error; errors mean the engine itself
/// failed.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize text runs in an image, in reading order
    async fn recognize(&self, image: &RgbaImage) -> Result<Vec<RecognizedRun>, OcrError>;
}

#[async_trait]
impl<T: TextRecognizer + ?Sized> TextRecognizer for Box<T> {
    async fn recognize(&self, image: &RgbaImage) -> Result<Vec<RecognizedRun>, OcrError> {
        (**self).recognize(image).await
    }
}
