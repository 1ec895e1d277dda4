//! Fuzzy word matching
//!
//! Scores a query against segmented words. Both sides are lowercased before
//! scoring; the word keeps its original text for projection.

use serde::{Deserialize, Serialize};

use super::segment::Word;

/// Default minimum score for a word to count as a match
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Default number of candidates considered for nearest-match selection
pub const DEFAULT_TOP_K: usize = 5;

/// String similarity metric used for scoring
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Normalized Levenshtein edit distance
    #[default]
    Levenshtein,
    /// Normalized Damerau-Levenshtein distance (adjacent swaps cost one edit)
    DamerauLevenshtein,
    /// Jaro-Winkler similarity, favouring shared prefixes
    JaroWinkler,
    /// Sørensen-Dice coefficient over character bigrams
    SorensenDice,
}

impl Scorer {
    /// Similarity of two already case-folded strings in `0.0..=1.0`
    fn similarity(self, a: &str, b: &str) -> f64 {
        match self {
            Scorer::Levenshtein => strsim::normalized_levenshtein(a, b),
            Scorer::DamerauLevenshtein => strsim::normalized_damerau_levenshtein(a, b),
            Scorer::JaroWinkler => strsim::jaro_winkler(a, b),
            Scorer::SorensenDice => strsim::sorensen_dice(a, b),
        }
    }

    /// Integer score in `0..=100` between two case-folded strings
    ///
    /// An empty string only matches another empty string.
    fn score_folded(self, query: &str, candidate: &str) -> u8 {
        if query.is_empty() || candidate.is_empty() {
            return if query == candidate { 100 } else { 0 };
        }
        (self.similarity(query, candidate) * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Case-insensitive score in `0..=100`; 100 is an exact match
    pub fn score(self, query: &str, candidate: &str) -> u8 {
        self.score_folded(&query.to_lowercase(), &candidate.to_lowercase())
    }
}

/// A word paired with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch<'a> {
    pub word: Word<'a>,
    pub score: u8,
}

/// Scores queries against candidate words
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher {
    scorer: Scorer,
}

impl FuzzyMatcher {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> Scorer {
        self.scorer
    }

    fn scored<'a, 'w>(
        &self,
        query: &str,
        words: &'w [Word<'a>],
        threshold: u8,
    ) -> impl Iterator<Item = ScoredMatch<'a>> + 'w {
        let query = query.to_lowercase();
        let scorer = self.scorer;
        words.iter().filter_map(move |word| {
            let score = scorer.score_folded(&query, &word.text().to_lowercase());
            (score >= threshold).then_some(ScoredMatch { word: *word, score })
        })
    }

    /// Every word scoring at least `threshold`, in encounter order
    pub fn match_all<'a>(
        &self,
        query: &str,
        words: &[Word<'a>],
        threshold: u8,
    ) -> Vec<ScoredMatch<'a>> {
        self.scored(query, words, threshold).collect()
    }

    /// The `k` best words scoring at least `threshold`
    ///
    /// Sorted by descending score; equal scores keep encounter order.
    pub fn match_top_k<'a>(
        &self,
        query: &str,
        words: &[Word<'a>],
        k: usize,
        threshold: u8,
    ) -> Vec<ScoredMatch<'a>> {
        let mut matches: Vec<ScoredMatch<'a>> = self.scored(query, words, threshold).collect();
        // stable sort
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(k);
        matches
    }
}
