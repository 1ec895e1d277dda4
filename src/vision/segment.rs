//! Word segmentation
//!
//! OCR engines frequently drop or invent spaces, so a recognized run is split
//! on character-class transitions instead of whitespace alone. The rules form
//! a small CamelCase/alphanumeric tokenizer:
//!
//! - lowercase letters and digits extend the current word
//! - an uppercase letter extends the current word only if it is empty
//! - any other character ends the current word; an uppercase letter then
//!   starts the next one
//!
//! Words shorter than the minimum length are dropped.

use unicode_general_category::{get_general_category, GeneralCategory};

use super::RecognizedRun;

/// Default minimum word length in characters
pub const MIN_WORD_LEN: usize = 3;

/// A sub-span of a recognized run
///
/// Borrows its run, so a word cannot outlive the OCR output it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Word<'a> {
    text: &'a str,
    /// Character (not byte) index into `source.text`
    offset: usize,
    /// Length of `text` in characters
    len: usize,
    source: &'a RecognizedRun,
}

impl<'a> Word<'a> {
    /// Create a word covering `len` characters of `source` starting at `offset`
    ///
    /// # Panics
    ///
    /// Panics if the span does not fit inside `source.text`.
    pub fn new(source: &'a RecognizedRun, offset: usize, len: usize) -> Self {
        let boundaries: Vec<usize> = source
            .text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(source.text.len()))
            .collect();
        assert!(
            offset + len < boundaries.len(),
            "span {}..{} is outside run {:?}",
            offset,
            offset + len,
            source.text
        );

        Self {
            text: &source.text[boundaries[offset]..boundaries[offset + len]],
            offset,
            len,
            source,
        }
    }

    /// The word exactly as recognized (case preserved)
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.len
    }

    /// The run this word was cut from
    pub fn source(&self) -> &'a RecognizedRun {
        self.source
    }
}

/// Splits recognized runs into candidate words
#[derive(Debug, Clone, Copy)]
pub struct WordSegmenter {
    min_word_len: usize,
}

impl Default for WordSegmenter {
    fn default() -> Self {
        Self::new(MIN_WORD_LEN)
    }
}

/// Lowercase letter (`Ll`)
fn is_lower(c: char) -> bool {
    get_general_category(c) == GeneralCategory::LowercaseLetter
}

/// Uppercase letter (`Lu`)
fn is_upper(c: char) -> bool {
    get_general_category(c) == GeneralCategory::UppercaseLetter
}

/// Decimal digit (`Nd`); superscripts, fractions and numerals don't count
fn is_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Word being accumulated during a scan
struct Pending {
    byte_start: usize,
    char_start: usize,
    len: usize,
}

impl WordSegmenter {
    pub fn new(min_word_len: usize) -> Self {
        Self { min_word_len }
    }

    pub fn min_word_len(&self) -> usize {
        self.min_word_len
    }

    /// Split one run into words, in reading order
    pub fn segment<'a>(&self, run: &'a RecognizedRun) -> Vec<Word<'a>> {
        let text = run.text.as_str();
        let mut words = Vec::with_capacity(text.len() / self.min_word_len.max(1));
        let mut pending = Pending {
            byte_start: 0,
            char_start: 0,
            len: 0,
        };

        for (index, (byte_index, c)) in text.char_indices().enumerate() {
            if is_lower(c) || is_digit(c) || (is_upper(c) && pending.len == 0) {
                pending.len += 1;
                continue;
            }

            self.flush(run, &pending, byte_index, &mut words);

            pending = if is_upper(c) {
                Pending {
                    byte_start: byte_index,
                    char_start: index,
                    len: 1,
                }
            } else {
                Pending {
                    byte_start: byte_index + c.len_utf8(),
                    char_start: index + 1,
                    len: 0,
                }
            };
        }
        self.flush(run, &pending, text.len(), &mut words);

        words
    }

    /// Segment every run and concatenate the results in run order
    pub fn segment_all<'a>(&self, runs: &'a [RecognizedRun]) -> Vec<Word<'a>> {
        runs.iter().flat_map(|run| self.segment(run)).collect()
    }

    fn flush<'a>(
        &self,
        run: &'a RecognizedRun,
        pending: &Pending,
        byte_end: usize,
        words: &mut Vec<Word<'a>>,
    ) {
        if pending.len >= self.min_word_len && pending.len > 0 {
            words.push(Word {
                text: &run.text[pending.byte_start..byte_end],
                offset: pending.char_start,
                len: pending.len,
                source: run,
            });
        }
    }
}
