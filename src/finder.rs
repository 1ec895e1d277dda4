//! Screen text finder
//!
//! Ties capture, OCR and selection together. Each call captures its region,
//! recognizes it, and matches against runs that live only for that call.
//! Capture and OCR errors propagate unchanged; no text or no match is an
//! empty result.

use tracing::{debug, info};

use crate::capture::{CapturedFrame, ScreenCapture};
use crate::config::MatchSettings;
use crate::error::FindResult;
use crate::geometry::{Region, ScreenPoint, ScreenRect};
use crate::vision::{RecognizedRun, SpatialSelector, TextRecognizer};

/// Finds text on screen
pub struct ScreenTextFinder<C, R> {
    capture: C,
    recognizer: R,
    selector: SpatialSelector,
}

impl<C: ScreenCapture, R: TextRecognizer> ScreenTextFinder<C, R> {
    /// Create a finder with default match settings
    pub fn new(capture: C, recognizer: R) -> Self {
        Self::with_settings(capture, recognizer, &MatchSettings::default())
    }

    /// Create a finder with custom match settings
    pub fn with_settings(capture: C, recognizer: R, settings: &MatchSettings) -> Self {
        Self {
            capture,
            recognizer,
            selector: SpatialSelector::new(settings),
        }
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Capture `region` and run OCR over it
    async fn recognize_region(
        &self,
        region: Region,
    ) -> FindResult<(CapturedFrame, Vec<RecognizedRun>)> {
        let frame = self.capture.capture(region).await?;
        let (width, height) = frame.dimensions();
        debug!("Captured {}x{} frame at {:?}", width, height, frame.origin());

        let runs = self.recognizer.recognize(&frame.image).await?;
        debug!("Recognized {} runs", runs.len());

        Ok((frame, runs))
    }

    /// Screen boxes of every word in `region` matching `query`
    pub async fn find_all(&self, query: &str, region: Region) -> FindResult<Vec<ScreenRect>> {
        let (frame, runs) = self.recognize_region(region).await?;
        let rects = self.selector.select_all(query, &runs, frame.origin());
        info!("Found {} matches for {:?} in {:?}", rects.len(), query, region);
        Ok(rects)
    }

    /// Screen box of the best match in `region` closest to `reference`
    ///
    /// `reference` defaults to the center of `region`.
    pub async fn find_closest(
        &self,
        query: &str,
        region: Region,
        reference: Option<ScreenPoint>,
    ) -> FindResult<Option<ScreenRect>> {
        let reference = reference.unwrap_or_else(|| region.center());
        let (frame, runs) = self.recognize_region(region).await?;
        let closest = self
            .selector
            .select_closest(query, &runs, frame.origin(), reference);

        match &closest {
            Some(rect) => info!("Closest match for {:?} at {:?}", query, rect),
            None => info!("No match for {:?} in {:?}", query, region),
        }
        Ok(closest)
    }

    /// [`find_all`](Self::find_all) over a square of side `size` centered on `(x, y)`
    pub async fn find_all_near(
        &self,
        query: &str,
        x: f64,
        y: f64,
        size: u32,
    ) -> FindResult<Vec<ScreenRect>> {
        self.find_all(query, Region::centered(x, y, size)).await
    }

    /// [`find_closest`](Self::find_closest) over a square of side `size`
    /// centered on `(x, y)`, nearest to that center
    pub async fn find_closest_near(
        &self,
        query: &str,
        x: f64,
        y: f64,
        size: u32,
    ) -> FindResult<Option<ScreenRect>> {
        self.find_closest(query, Region::centered(x, y, size), None).await
    }

    /// Recognized text of `region`, runs joined by single spaces
    pub async fn read_text(&self, region: Region) -> FindResult<String> {
        let (_, runs) = self.recognize_region(region).await?;
        Ok(runs
            .iter()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}
