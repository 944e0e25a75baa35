//! Memory Tracker
//!
//! Session-wide word frequency table. Raises a memory trigger once a
//! qualifying word has been written often enough to look significant.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"));

/// Lowercase and strip every character outside ASCII `[A-Za-z0-9_]`
pub fn normalize_word(word: &str) -> String {
    NON_WORD.replace_all(&word.to_lowercase(), "").into_owned()
}

/// A word that crossed the repetition threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryTrigger {
    pub word: String,
    pub count: u32,
}

impl MemoryTrigger {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MemoryTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You've mentioned \"{}\" {} times - this seems significant to you",
            self.word, self.count
        )
    }
}

/// Cumulative, insertion-ordered word counts for one session
#[derive(Debug, Clone)]
pub struct MemoryTracker {
    frequencies: IndexMap<String, u32>,
    min_word_length: usize,
    threshold: u32,
}

impl MemoryTracker {
    /// `min_word_length` is exclusive: only longer words are tracked
    pub fn new(min_word_length: usize, threshold: u32) -> Self {
        Self {
            frequencies: IndexMap::new(),
            min_word_length,
            threshold,
        }
    }

    /// Count `words` and report the first tracked word at or above the threshold
    ///
    /// The scan follows insertion order, so the earliest-seen qualifying word
    /// wins even when a later one has a higher count.
    pub fn observe<'a, I>(&mut self, words: I) -> Option<MemoryTrigger>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.record(words);
        self.first_qualifying()
    }

    /// Count `words` without scanning
    pub fn record<'a, I>(&mut self, words: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for word in words {
            let normalized = normalize_word(word);
            if normalized.chars().count() > self.min_word_length {
                *self.frequencies.entry(normalized).or_insert(0) += 1;
            }
        }
    }

    /// First tracked word at or above the threshold, with its current count
    pub fn first_qualifying(&self) -> Option<MemoryTrigger> {
        self.frequencies
            .iter()
            .find(|(_, count)| **count >= self.threshold)
            .map(|(word, count)| MemoryTrigger {
                word: word.clone(),
                count: *count,
            })
    }

    pub fn count(&self, word: &str) -> u32 {
        self.frequencies
            .get(&normalize_word(word))
            .copied()
            .unwrap_or(0)
    }

    pub fn frequencies(&self) -> &IndexMap<String, u32> {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Only a full session reset forgets counts
    pub fn clear(&mut self) {
        self.frequencies.clear();
    }
}

impl Default for MemoryTracker {
    fn default() -> Self {
        Self::new(4, 3)
    }
}
