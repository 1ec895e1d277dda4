//! screen-text-finder - locate on-screen text by OCR and fuzzy word matching
//!
//! A read-only screen parsing library: it captures a region, recognizes the
//! text in it and reports where words resembling a query appear, without
//! interacting with the applications on screen.
//!
//! ```no_run
//! # async fn demo() -> Result<(), screen_text_finder::FindError> {
//! use screen_text_finder::{Region, ReplayRecognizer, ScreenTextFinder, ScreenshotFileCapture};
//!
//! let capture = ScreenshotFileCapture::open("screen.png".as_ref())?;
//! let finder = ScreenTextFinder::new(capture, ReplayRecognizer::default());
//! let rects = finder.find_all("bitmap", Region::new(0, 0, 1920, 1080)).await?;
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod finder;
pub mod geometry;
pub mod highlight;
pub mod vision;

pub use capture::{CapturedFrame, ScreenCapture, ScreenshotFileCapture};
pub use config::FinderConfig;
pub use error::{CaptureError, ConfigError, FindError, FindResult, OcrError};
pub use finder::ScreenTextFinder;
pub use geometry::{ImagePoint, ImageRect, Region, ScreenPoint, ScreenRect};
pub use vision::{RecognizedRun, ReplayRecognizer, Scorer, TextRecognizer};
#[cfg(windows)]
pub use vision::WindowsOcr;
