//! Windows OCR API backend
//!
//! Uses the built-in Windows OCR (Media.Ocr). Every recognized word becomes one
//! run; Windows splits lines on spaces, which the segmenter then refines.

use async_trait::async_trait;
use image::RgbaImage;
use tracing::{debug, info, warn};
use windows::{
    core::HSTRING,
    Foundation::IAsyncOperation,
    Globalization::Language,
    Graphics::Imaging::{BitmapPixelFormat, SoftwareBitmap},
    Media::Ocr::{OcrEngine as WinOcrEngine, OcrResult as WinOcrResult},
    Storage::Streams::{DataReader, DataWriter, InMemoryRandomAccessStream},
};

use crate::error::OcrError;
use crate::geometry::ImageRect;

use super::{RecognizedRun, TextRecognizer};

/// Attach a description to WinRT failures
trait IntoOcrResult<T> {
    fn ocr_context(self, what: &str) -> Result<T, OcrError>;
}

impl<T> IntoOcrResult<T> for windows::core::Result<T> {
    fn ocr_context(self, what: &str) -> Result<T, OcrError> {
        self.map_err(|e| OcrError::ProcessingError(format!("{}: {:?}", what, e)))
    }
}

/// Windows OCR engine wrapper
#[derive(Clone)]
pub struct WindowsOcr {
    engine: WinOcrEngine,
    language: String,
}

impl WindowsOcr {
    /// Create a Windows OCR engine for the given language tag
    ///
    /// Falls back to the user profile languages when the tag is not supported.
    pub fn new(language_tag: &str) -> Result<Self, OcrError> {
        info!("Initializing Windows OCR engine with language: {}", language_tag);

        let language = Language::CreateLanguage(&HSTRING::from(language_tag))
            .map_err(|_| OcrError::InvalidLanguage(language_tag.to_string()))?;

        if !WinOcrEngine::IsLanguageSupported(&language)
            .ocr_context("Failed to check language support")?
        {
            warn!(
                "Language '{}' not supported, falling back to user profile languages",
                language_tag
            );
            let engine = WinOcrEngine::TryCreateFromUserProfileLanguages()
                .map_err(|e| OcrError::EngineNotAvailable(format!("{:?}", e)))?;

            let lang_tag = engine
                .RecognizerLanguage()
                .and_then(|lang| lang.LanguageTag())
                .ocr_context("Failed to get recognizer language")?
                .to_string();

            info!("Windows OCR initialized with language: {}", lang_tag);
            return Ok(Self {
                engine,
                language: lang_tag,
            });
        }

        let engine = WinOcrEngine::TryCreateFromLanguage(&language)
            .map_err(|e| OcrError::EngineNotAvailable(format!("{:?}", e)))?;

        info!("Windows OCR initialized successfully");

        Ok(Self {
            engine,
            language: language_tag.to_string(),
        })
    }

    /// Get the recognizer language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get available OCR languages on this system
    pub fn available_languages() -> Result<Vec<String>, OcrError> {
        let languages = WinOcrEngine::AvailableRecognizerLanguages()
            .ocr_context("Failed to get available languages")?;

        let mut result = Vec::new();
        for i in 0..languages.Size().ocr_context("Failed to get languages size")? {
            if let Ok(tag) = languages.GetAt(i).and_then(|lang| lang.LanguageTag()) {
                result.push(tag.to_string());
            }
        }

        Ok(result)
    }

    /// Recognize word runs in an image, blocking until the engine finishes
    pub fn recognize_blocking(&self, image: &RgbaImage) -> Result<Vec<RecognizedRun>, OcrError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(vec![]);
        }

        debug!("Windows OCR: Processing {}x{} image", width, height);

        let bgra_data = rgba_to_bgra(image.as_raw());
        let bitmap = create_software_bitmap(&bgra_data, width, height)?;
        let ocr_result = run_ocr_sync(&self.engine, &bitmap)?;
        let runs = extract_runs(&ocr_result)?;

        debug!("Windows OCR: Found {} runs", runs.len());

        Ok(runs)
    }
}

#[async_trait]
impl TextRecognizer for WindowsOcr {
    async fn recognize(&self, image: &RgbaImage) -> Result<Vec<RecognizedRun>, OcrError> {
        let ocr = self.clone();
        let image = image.clone();
        tokio::task::spawn_blocking(move || ocr.recognize_blocking(&image))
            .await
            .map_err(|e| OcrError::ProcessingError(format!("OCR task failed: {}", e)))?
    }
}

/// Convert RGBA to BGRA (Windows expects BGRA)
fn rgba_to_bgra(rgba: &[u8]) -> Vec<u8> {
    let mut bgra = rgba.to_vec();
    for chunk in bgra.chunks_exact_mut(4) {
        chunk.swap(0, 2);
    }
    bgra
}

/// Create a SoftwareBitmap from BGRA data using CopyFromBuffer
fn create_software_bitmap(
    bgra_data: &[u8],
    width: u32,
    height: u32,
) -> Result<SoftwareBitmap, OcrError> {
    let stream =
        InMemoryRandomAccessStream::new().ocr_context("Failed to create in-memory stream")?;
    let writer =
        DataWriter::CreateDataWriter(&stream).ocr_context("Failed to create data writer")?;

    writer.WriteBytes(bgra_data).ocr_context("Failed to write pixel data")?;
    writer
        .StoreAsync()
        .and_then(|op| op.get())
        .ocr_context("Failed to store data")?;
    writer
        .FlushAsync()
        .and_then(|op| op.get())
        .ocr_context("Failed to flush data")?;

    let bitmap = SoftwareBitmap::Create(BitmapPixelFormat::Bgra8, width as i32, height as i32)
        .ocr_context("Failed to create SoftwareBitmap")?;

    let input_stream = stream.GetInputStreamAt(0).ocr_context("Failed to get input stream")?;
    let reader =
        DataReader::CreateDataReader(&input_stream).ocr_context("Failed to create data reader")?;
    reader
        .LoadAsync(bgra_data.len() as u32)
        .and_then(|op| op.get())
        .ocr_context("Failed to load data")?;
    let buffer = reader
        .ReadBuffer(bgra_data.len() as u32)
        .ocr_context("Failed to read buffer")?;

    bitmap.CopyFromBuffer(&buffer).ocr_context("Failed to copy buffer to bitmap")?;

    Ok(bitmap)
}

/// Run OCR synchronously (blocks until complete)
fn run_ocr_sync(engine: &WinOcrEngine, bitmap: &SoftwareBitmap) -> Result<WinOcrResult, OcrError> {
    let async_op: IAsyncOperation<WinOcrResult> = engine
        .RecognizeAsync(bitmap)
        .ocr_context("Failed to start OCR recognition")?;

    async_op.get().ocr_context("OCR recognition failed")
}

/// Flatten lines into word-level runs, in reading order
fn extract_runs(ocr_result: &WinOcrResult) -> Result<Vec<RecognizedRun>, OcrError> {
    let mut runs = Vec::new();

    let lines = ocr_result.Lines().ocr_context("Failed to get OCR lines")?;
    for i in 0..lines.Size().ocr_context("Failed to get lines size")? {
        let words = lines
            .GetAt(i)
            .and_then(|line| line.Words())
            .ocr_context("Failed to get words")?;

        for j in 0..words.Size().ocr_context("Failed to get words size")? {
            let word = words.GetAt(j).ocr_context("Failed to get word")?;
            let text = word.Text().ocr_context("Failed to get word text")?.to_string();
            let rect = word.BoundingRect().ocr_context("Failed to get bounding rect")?;
            if rect.Width <= 0.0 {
                debug!("Skipping zero-width word {:?}", text);
                continue;
            }

            runs.push(RecognizedRun::new(
                text,
                ImageRect::new(
                    rect.X as f64,
                    rect.Y as f64,
                    rect.Width as f64,
                    rect.Height as f64,
                ),
            ));
        }
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_to_bgra() {
        assert_eq!(rgba_to_bgra(&[1, 2, 3, 4, 5, 6, 7, 8]), vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn test_available_languages() {
        let languages = WindowsOcr::available_languages().unwrap();
        // Most Windows installations have at least English
        assert!(!languages.is_empty());
    }

    #[test]
    fn test_blank_image_has_no_runs() {
        let ocr = WindowsOcr::new("en-US").unwrap();
        let runs = ocr.recognize_blocking(&RgbaImage::new(64, 64)).unwrap();
        assert!(runs.is_empty());
    }
}
