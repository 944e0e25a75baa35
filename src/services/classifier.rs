//! Mood Classifier
//!
//! Scores text against the emotion lexicon and resolves the dominant mood.

use serde::{Deserialize, Serialize};

use crate::models::draft::TextStats;
use crate::models::mood::{Emotion, MoodState};
use crate::services::lexicon::Category;

/// Per-category keyword hit counts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryScores {
    pub joy: u32,
    pub sad: u32,
    pub angry: u32,
    pub calm: u32,
    pub anxious: u32,
}

impl CategoryScores {
    /// Count keyword hits for every category in `text`
    pub fn score(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self {
            joy: Category::Joy.count_in(&lowered),
            sad: Category::Sad.count_in(&lowered),
            angry: Category::Angry.count_in(&lowered),
            calm: Category::Calm.count_in(&lowered),
            anxious: Category::Anxious.count_in(&lowered),
        }
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Joy => self.joy,
            Category::Sad => self.sad,
            Category::Angry => self.angry,
            Category::Calm => self.calm,
            Category::Anxious => self.anxious,
        }
    }

    /// Category with the strictly highest count, `None` when nothing matched
    ///
    /// Ties keep the earlier category: a later one only replaces the current
    /// pick if its count is strictly greater.
    pub fn dominant(&self) -> Option<Category> {
        let best = Category::ALL
            .into_iter()
            .reduce(|prev, curr| if self.get(curr) > self.get(prev) { curr } else { prev })?;
        (self.get(best) > 0).then_some(best)
    }
}

/// Result of classifying one draft
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub mood: MoodState,
    pub dominant: Option<Category>,
    pub scores: CategoryScores,
    pub stats: TextStats,
}

/// Keyword-based mood classifier
#[derive(Debug, Clone)]
pub struct MoodClassifier {
    fallback_word_threshold: usize,
}

impl MoodClassifier {
    pub fn new(fallback_word_threshold: usize) -> Self {
        Self {
            fallback_word_threshold,
        }
    }

    /// Classify the full draft text
    ///
    /// Without any keyword hit, long drafts read as reflective and short
    /// ones as contemplative.
    pub fn classify(&self, text: &str) -> Classification {
        let scores = CategoryScores::score(text);
        let stats = TextStats::from_text(text);
        let dominant = scores.dominant();

        let emotion = match dominant {
            Some(category) => category.emotion(),
            None if stats.word_count > self.fallback_word_threshold => Emotion::Reflective,
            None => Emotion::Contemplative,
        };

        Classification {
            mood: MoodState::new(emotion),
            dominant,
            scores,
            stats,
        }
    }
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new(50)
    }
}
