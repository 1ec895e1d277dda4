//! Error types
//!
//! Capture and OCR failures are the only real failure sources; the matching
//! core is pure and never fails on valid input.

use std::io;
use thiserror::Error;

use crate::geometry::Region;

/// Error returned by a find operation
#[derive(Debug, Error)]
pub enum FindError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),
}

/// Screen capture errors
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Region {0:?} lies entirely off-screen")]
    OffScreen(Region),

    #[error("Invalid capture region: {0:?}")]
    InvalidRegion(Region),

    #[error("Screen source unavailable: {0}")]
    Unavailable(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// OCR collaborator errors
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid recorded OCR data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for find operations
pub type FindResult<T> = Result<T, FindError>;
