use icu_segmenter::WordSegmenter;

/// Segments free-form text into word tokens and joins them with single
/// ASCII spaces.
///
/// The segmenter is ICU4X's auto word segmenter, which falls back to
/// dictionary/LSTM segmentation for scripts without whitespace word
/// boundaries. The production data mixes Thai with Latin codes, so plain
/// whitespace splitting would leave whole Thai phrases as one token.
///
/// Only word-like segments (letters and numbers) are kept; whitespace and
/// punctuation segments are dropped. The downstream vocabulary was trained
/// with punctuation filtered out, so this matches the ids it can produce.
pub struct Normalizer {
    segmenter: WordSegmenter,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            segmenter: WordSegmenter::new_auto(),
        }
    }

    /// Segment `text` into word tokens joined by single spaces. Empty input
    /// (or input with no word-like content) yields an empty string; this
    /// never errors.
    pub fn normalize(&self, text: &str) -> String {
        let mut words: Vec<&str> = Vec::new();
        let mut iter = self.segmenter.segment_str(text);
        let mut last = 0usize;
        while let Some(boundary) = iter.next() {
            if boundary > last && iter.is_word_like() {
                words.push(&text[last..boundary]);
            }
            last = boundary;
        }
        words.join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
