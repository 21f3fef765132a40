/*!
 * Word frequency index behind the clickable word cloud.
 *
 * Only the data is produced here: counts per word and the start offsets of
 * the segments each word appears in, so a click on a word can seek the
 * player. Layout and drawing belong to the front end.
 */

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::segment::Segment;

// @const: Word tokens (letters, digits, inner apostrophes)
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("word pattern is valid")
});

// @const: English function words that carry no topic
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
        "be", "because", "been", "before", "being", "but", "by", "can", "could", "did", "do",
        "does", "doing", "don't", "down", "each", "even", "few", "for", "from", "get", "got",
        "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i",
        "i'm", "if", "in", "into", "is", "it", "it's", "its", "just", "know", "like", "me", "more",
        "most", "my", "no", "not", "now", "of", "off", "oh", "ok", "okay", "on", "once", "one",
        "only", "or", "other", "our", "out", "over", "own", "really", "right", "same", "she",
        "should", "so", "some", "such", "than", "that", "that's", "the", "their", "them", "then",
        "there", "these", "they", "this", "those", "through", "to", "too", "um", "uh", "under",
        "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
        "why", "will", "with", "would", "yeah", "you", "you're", "your",
    ]
    .into_iter()
    .collect()
});

/// Tuning for [`WordIndex::build`]
#[derive(Debug, Clone)]
pub struct WordIndexOptions {
    /// Maximum number of entries returned by [`WordIndex::entries`]
    pub max_words: usize,
    /// Words shorter than this (in characters) are ignored
    pub min_word_length: usize,
}

impl Default for WordIndexOptions {
    fn default() -> Self {
        Self {
            max_words: 100,
            min_word_length: 3,
        }
    }
}

/// One word of the cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Lowercased word
    pub word: String,
    /// Total occurrences
    pub count: usize,
    /// Start offsets (seconds) of the segments containing the word
    pub timestamps: Vec<f64>,
}

/// Word frequencies for one transcript
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    entries: Vec<WordEntry>,
    positions: HashMap<String, Vec<f64>>,
}

impl WordIndex {
    /// Count words across `segments`
    pub fn build(segments: &[Segment], options: &WordIndexOptions) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut positions: HashMap<String, Vec<f64>> = HashMap::new();

        for seg in segments {
            let mut seen_here: HashSet<String> = HashSet::new();
            for token in WORD_REGEX.find_iter(&seg.text) {
                let word = token.as_str().to_lowercase().replace('’', "'");
                if word.chars().count() < options.min_word_length || STOP_WORDS.contains(word.as_str()) {
                    continue;
                }
                if word.chars().all(|c| c.is_numeric()) {
                    continue;
                }

                *counts.entry(word.clone()).or_insert(0) += 1;
                if seen_here.insert(word.clone()) {
                    positions.entry(word).or_default().push(seg.start);
                }
            }
        }

        let mut entries: Vec<WordEntry> = counts
            .into_iter()
            .map(|(word, count)| WordEntry {
                timestamps: positions.get(&word).cloned().unwrap_or_default(),
                word,
                count,
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        entries.truncate(options.max_words);

        WordIndex { entries, positions }
    }

    /// Most frequent words first, ties broken alphabetically
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Where a word occurs, for click-to-seek
    pub fn timestamps_for(&self, word: &str) -> Option<&[f64]> {
        self.positions
            .get(&word.trim().to_lowercase())
            .map(|v| v.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
