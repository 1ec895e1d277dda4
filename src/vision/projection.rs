//! Word geometry projection
//!
//! OCR engines report one box per run, not per glyph. A word's box is
//! approximated by treating its run as monospaced: the run width is divided
//! evenly between its characters and the word gets the slice covering its
//! offset and length. Top and height come straight from the run since runs
//! are single-line.
//!
//! The approximation is knowingly rough. With proportional fonts a word of
//! narrow letters ("ill") is reported wider than it is and vice versa, and
//! scripts whose visual width does not follow character count (combining
//! marks, CJK mixed with Latin) drift further. Callers that need exact glyph
//! boxes need an OCR backend that reports them.
//!
//! A run with no width cannot be divided, so projecting from one panics
//! like an out-of-bounds span does.

use crate::geometry::{ImagePoint, ImageRect};

use super::segment::Word;

/// Approximate box of `word`, in the coordinate space of its run
///
/// # Panics
///
/// Panics if the word does not lie inside its run, or if the run's box has
/// no width. Words produced by the segmenter always satisfy the first.
pub fn project(word: &Word<'_>) -> ImageRect {
    let run = word.source();
    let bounds = run.bounding_box;
    let run_len = run.char_count();
    assert!(
        word.offset() + word.char_len() <= run_len && run_len > 0,
        "word {:?} at offset {} lies outside run {:?}",
        word.text(),
        word.offset(),
        run.text
    );
    assert!(
        bounds.width > 0.0,
        "run {:?} has non-positive width {}",
        run.text,
        bounds.width
    );

    let char_width = bounds.width / run_len as f64;
    ImageRect::new(
        bounds.x + char_width * word.offset() as f64,
        bounds.y,
        char_width * word.char_len() as f64,
        bounds.height,
    )
}

/// Approximate center of `word`: horizontal center of its box at the run's
/// vertical center
pub fn project_point(word: &Word<'_>) -> ImagePoint {
    let rect = project(word);
    let bounds = word.source().bounding_box;
    ImagePoint::new(rect.x + rect.width / 2.0, bounds.y + bounds.height / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::segment::WordSegmenter;
    use crate::vision::RecognizedRun;

    #[test]
    fn test_project_camel_case_run() {
        // 16 characters over 160 px: 10 px per character
        let run = RecognizedRun::new(
            "GetWordPosition.",
            ImageRect::new(0.0, 0.0, 160.0, 20.0),
        );
        let words = WordSegmenter::default().segment(&run);
        assert_eq!(words.len(), 3);

        assert_eq!(project(&words[0]), ImageRect::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(project(&words[1]), ImageRect::new(30.0, 0.0, 40.0, 20.0));
        assert_eq!(words[2].text(), "Position");
        assert_eq!(project(&words[2]), ImageRect::new(70.0, 0.0, 80.0, 20.0));
    }

    #[test]
    fn test_project_offset_run() {
        let run = RecognizedRun::new("save changes", ImageRect::new(50.0, 30.0, 120.0, 16.0));
        let words = WordSegmenter::default().segment(&run);

        assert_eq!(project(&words[1]), ImageRect::new(100.0, 30.0, 70.0, 16.0));
    }

    #[test]
    fn test_project_point() {
        let run = RecognizedRun::new(
            "GetWordPosition.",
            ImageRect::new(0.0, 10.0, 160.0, 20.0),
        );
        let words = WordSegmenter::default().segment(&run);

        assert_eq!(project_point(&words[2]), ImagePoint::new(110.0, 20.0));
    }

    #[test]
    fn test_project_uses_character_count() {
        // 4 characters (8 bytes) over 40 px
        let run = RecognizedRun::new("ДомA", ImageRect::new(0.0, 0.0, 40.0, 10.0));
        let words = WordSegmenter::default().segment(&run);
        assert_eq!(words[0].text(), "Дом");
        assert_eq!(project(&words[0]), ImageRect::new(0.0, 0.0, 30.0, 10.0));
    }

    #[test]
    #[should_panic(expected = "non-positive width")]
    fn test_zero_width_run_panics() {
        let run = RecognizedRun::new("hidden", ImageRect::new(5.0, 5.0, 0.0, 10.0));
        let word = Word::new(&run, 0, 6);
        let _ = project(&word);
    }

    #[test]
    #[should_panic(expected = "non-positive width")]
    fn test_negative_width_run_panics() {
        let run = RecognizedRun::new("hidden", ImageRect::new(5.0, 5.0, -4.0, 10.0));
        let word = Word::new(&run, 0, 6);
        let _ = project_point(&word);
    }

    #[test]
    fn test_projection_and_translation_agree() {
        let run = RecognizedRun::new(
            "open fileDialog",
            ImageRect::new(13.0, 7.0, 150.0, 18.0),
        );
        let words = WordSegmenter::default().segment(&run);
        let origin = (640, 480);

        for word in &words {
            let local = project(word);
            let screen = local.translate(origin);
            assert_eq!(screen.x, local.x + 640.0);
            assert_eq!(screen.y, local.y + 480.0);
            assert_eq!(screen.width, local.width);
            assert_eq!(screen.height, local.height);
            assert_eq!(screen, project(word).translate(origin));
        }
    }
}
