//! Match selection
//!
//! Runs the synchronous part of a find: segment OCR runs, score the words,
//! then keep either every match or the one nearest a reference point, and
//! project the survivors into screen space.

use tracing::debug;

use crate::config::MatchSettings;
use crate::geometry::{ScreenPoint, ScreenRect};

use super::fuzzy::{FuzzyMatcher, ScoredMatch};
use super::projection::{project, project_point};
use super::segment::WordSegmenter;
use super::RecognizedRun;

/// Selects matching words from OCR output
#[derive(Debug, Clone, Copy)]
pub struct SpatialSelector {
    segmenter: WordSegmenter,
    matcher: FuzzyMatcher,
    threshold: u8,
    top_k: usize,
}

impl Default for SpatialSelector {
    fn default() -> Self {
        Self::new(&MatchSettings::default())
    }
}

impl SpatialSelector {
    pub fn new(settings: &MatchSettings) -> Self {
        Self {
            segmenter: WordSegmenter::new(settings.min_word_len),
            matcher: FuzzyMatcher::new(settings.scorer),
            threshold: settings.threshold,
            top_k: settings.top_k,
        }
    }

    /// Screen boxes of every word matching `query`
    ///
    /// `origin` is the screen offset of the image the runs were recognized in.
    pub fn select_all(
        &self,
        query: &str,
        runs: &[RecognizedRun],
        origin: (i32, i32),
    ) -> Vec<ScreenRect> {
        let words = self.segmenter.segment_all(runs);
        let matches = self.matcher.match_all(query, &words, self.threshold);
        debug!(
            "{} of {} words match {:?} (threshold {})",
            matches.len(),
            words.len(),
            query,
            self.threshold
        );

        matches
            .iter()
            .map(|m| project(&m.word).translate(origin))
            .collect()
    }

    /// Screen box of the best-scoring match closest to `reference`
    pub fn select_closest(
        &self,
        query: &str,
        runs: &[RecognizedRun],
        origin: (i32, i32),
        reference: ScreenPoint,
    ) -> Option<ScreenRect> {
        let words = self.segmenter.segment_all(runs);
        let candidates = self
            .matcher
            .match_top_k(query, &words, self.top_k, self.threshold);
        debug!(
            "{} candidates for {:?} among {} words",
            candidates.len(),
            query,
            words.len()
        );

        let closest = nearest(&candidates, origin, reference)?;
        debug!(
            "Closest match {:?} (score {}) at offset {} of {:?}",
            closest.word.text(),
            closest.score,
            closest.word.offset(),
            closest.word.source().text
        );
        Some(project(&closest.word).translate(origin))
    }
}

/// Candidate whose projected screen point is nearest `reference`
///
/// Exact ties go to the earlier candidate.
pub fn nearest<'m, 'a>(
    candidates: &'m [ScoredMatch<'a>],
    origin: (i32, i32),
    reference: ScreenPoint,
) -> Option<&'m ScoredMatch<'a>> {
    let mut closest = None;
    let mut smallest = f64::INFINITY;
    for candidate in candidates {
        let distance = project_point(&candidate.word)
            .translate(origin)
            .distance_squared(&reference);
        if distance < smallest {
            smallest = distance;
            closest = Some(candidate);
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ImageRect;
    use crate::vision::fuzzy::Scorer;

    fn run(text: &str, x: f64, y: f64, width: f64) -> RecognizedRun {
        RecognizedRun::new(text, ImageRect::new(x, y, width, 20.0))
    }

    #[test]
    fn test_select_all_translates_every_match() {
        let runs = vec![
            run("Open Bitmap", 0.0, 0.0, 110.0),
            run("saveBitmap", 200.0, 100.0, 100.0),
            run("Cancel", 0.0, 300.0, 60.0),
        ];
        let rects = SpatialSelector::default().select_all("bitmap", &runs, (1000, 500));

        assert_eq!(
            rects,
            vec![
                ScreenRect::new(1050.0, 500.0, 60.0, 20.0),
                ScreenRect::new(1240.0, 600.0, 60.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_select_all_no_runs() {
        let rects = SpatialSelector::default().select_all("bitmap", &[], (0, 0));
        assert!(rects.is_empty());
    }

    #[test]
    fn test_select_closest_empty_is_none() {
        let selector = SpatialSelector::default();
        let reference = ScreenPoint::new(50.0, 50.0);
        assert!(selector.select_closest("bitmap", &[], (0, 0), reference).is_none());

        let runs = vec![run("Cancel", 0.0, 0.0, 60.0)];
        assert!(selector.select_closest("bitmap", &runs, (0, 0), reference).is_none());
    }

    #[test]
    fn test_select_closest_prefers_nearest() {
        let runs = vec![
            run("Bitmap", 0.0, 0.0, 60.0),
            run("Bitmap", 400.0, 400.0, 60.0),
        ];
        let selector = SpatialSelector::default();

        let near_second =
            selector.select_closest("bitmap", &runs, (10, 10), ScreenPoint::new(440.0, 420.0));
        assert_eq!(near_second, Some(ScreenRect::new(410.0, 410.0, 60.0, 20.0)));

        let near_first =
            selector.select_closest("bitmap", &runs, (10, 10), ScreenPoint::new(0.0, 0.0));
        assert_eq!(near_first, Some(ScreenRect::new(10.0, 10.0, 60.0, 20.0)));
    }

    #[test]
    fn test_select_closest_tie_goes_to_first() {
        // Both centers are 100 px from the reference point
        let runs = vec![
            run("Bitmap", 0.0, 90.0, 60.0),
            run("Bitmap", 200.0, 90.0, 60.0),
        ];
        let reference = ScreenPoint::new(130.0, 100.0);
        let closest =
            SpatialSelector::default().select_closest("bitmap", &runs, (0, 0), reference);

        assert_eq!(closest, Some(ScreenRect::new(0.0, 90.0, 60.0, 20.0)));
    }

    #[test]
    fn test_select_closest_only_considers_top_k() {
        // The near word is a weaker match than the five exact ones far away
        let mut runs: Vec<RecognizedRun> = (0..5)
            .map(|i| run("Bitmap", 1000.0, i as f64 * 30.0, 60.0))
            .collect();
        runs.push(run("Bitmaps", 0.0, 0.0, 70.0));

        let reference = ScreenPoint::new(0.0, 0.0);
        let closest =
            SpatialSelector::default().select_closest("bitmap", &runs, (0, 0), reference);
        assert_eq!(closest, Some(ScreenRect::new(1000.0, 0.0, 60.0, 20.0)));
    }

    #[test]
    fn test_settings_are_applied() {
        let settings = MatchSettings {
            threshold: 50,
            top_k: 1,
            min_word_len: 2,
            scorer: Scorer::Levenshtein,
        };
        let runs = vec![run("go to bit", 0.0, 0.0, 90.0)];
        let rects = SpatialSelector::new(&settings).select_all("bitmap", &runs, (0, 0));

        assert_eq!(rects, vec![ScreenRect::new(60.0, 0.0, 30.0, 20.0)]);
    }
}
