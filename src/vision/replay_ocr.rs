//! Recorded OCR backend
//!
//! Serves runs captured earlier from a JSON file, so a search can be repeated
//! offline or on machines without an OCR engine. The runs are expected in the
//! image-local space of the frame they will be matched against.

use async_trait::async_trait;
use image::RgbaImage;
use std::path::Path;
use tracing::debug;

use crate::error::OcrError;

use super::{RecognizedRun, TextRecognizer};

/// OCR backend that returns a fixed set of runs
#[derive(Debug, Clone, Default)]
pub struct ReplayRecognizer {
    runs: Vec<RecognizedRun>,
}

impl ReplayRecognizer {
    pub fn new(runs: Vec<RecognizedRun>) -> Self {
        Self { runs }
    }

    /// Parse runs from a JSON array of `{ "text", "bounding_box" }` objects
    ///
    /// Runs with text but a non-positive width are rejected here, since
    /// words cannot be projected out of them.
    pub fn from_json(json: &str) -> Result<Self, OcrError> {
        let runs: Vec<RecognizedRun> = serde_json::from_str(json)?;
        let degenerate = |run: &&RecognizedRun| {
            let width = run.bounding_box.width;
            !run.text.is_empty() && (width <= 0.0 || width.is_nan())
        };
        if let Some(run) = runs.iter().find(degenerate) {
            return Err(OcrError::ProcessingError(format!(
                "recorded run {:?} has non-positive width {}",
                run.text, run.bounding_box.width
            )));
        }
        Ok(Self::new(runs))
    }

    /// Load runs from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, OcrError> {
        let content = std::fs::read_to_string(path)?;
        let recognizer = Self::from_json(&content)?;
        debug!("Loaded {} recorded runs from {:?}", recognizer.runs.len(), path);
        Ok(recognizer)
    }

    pub fn runs(&self) -> &[RecognizedRun] {
        &self.runs
    }
}

#[async_trait]
impl TextRecognizer for ReplayRecognizer {
    async fn recognize(&self, _image: &RgbaImage) -> Result<Vec<RecognizedRun>, OcrError> {
        Ok(self.runs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ImageRect;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RUNS_JSON: &str = r#"[
        {
            "text": "File",
            "bounding_box": { "x": 4.0, "y": 2.0, "width": 32.0, "height": 16.0 }
        },
        {
            "text": "EditBitmap",
            "bounding_box": { "x": 50.0, "y": 2.0, "width": 100.0, "height": 16.0 }
        }
    ]"#;

    #[test]
    fn test_from_json() {
        let recognizer = ReplayRecognizer::from_json(RUNS_JSON).unwrap();
        assert_eq!(recognizer.runs().len(), 2);
        assert_eq!(recognizer.runs()[1].text, "EditBitmap");
        assert_eq!(
            recognizer.runs()[1].bounding_box,
            ImageRect::new(50.0, 2.0, 100.0, 16.0)
        );
    }

    #[test]
    fn test_from_json_invalid() {
        let result = ReplayRecognizer::from_json("{ \"text\": 1 }");
        assert!(matches!(result, Err(OcrError::Json(_))));
    }

    #[test]
    fn test_from_json_rejects_zero_width_run() {
        let json = r#"[
            { "text": "Hidden", "bounding_box": { "x": 0, "y": 0, "width": 0, "height": 8 } }
        ]"#;
        let result = ReplayRecognizer::from_json(json);
        assert!(matches!(result, Err(OcrError::ProcessingError(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", RUNS_JSON).unwrap();

        let recognizer = ReplayRecognizer::from_json_file(temp_file.path()).unwrap();
        assert_eq!(recognizer.runs().len(), 2);
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = ReplayRecognizer::from_json_file(Path::new("/nonexistent/runs.json"));
        assert!(matches!(result, Err(OcrError::Io(_))));
    }

    #[tokio::test]
    async fn test_recognize_returns_recorded_runs() {
        let recognizer = ReplayRecognizer::from_json(RUNS_JSON).unwrap();
        let runs = recognizer.recognize(&RgbaImage::new(1, 1)).await.unwrap();
        assert_eq!(runs, recognizer.runs());
    }
}
