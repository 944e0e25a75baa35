//! Emotion Lexicon
//!
//! Fixed keyword vocabulary per emotion category. Declaration order matters:
//! the classifier breaks ties in favour of the earlier category.

use serde::{Deserialize, Serialize};

use crate::models::mood::{Emotion, Rgb};

/// Keyword categories, in tie-break order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Joy,
    Sad,
    Angry,
    Calm,
    Anxious,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 5] = [
        Category::Joy,
        Category::Sad,
        Category::Angry,
        Category::Calm,
        Category::Anxious,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Joy => &[
                "happy", "joy", "excited", "love", "wonderful", "amazing", "great",
            ],
            Category::Sad => &[
                "sad", "depressed", "unhappy", "hurt", "pain", "sorry", "difficult",
            ],
            Category::Angry => &["angry", "frustrated", "mad", "annoyed", "hate", "furious"],
            Category::Calm => &["peaceful", "calm", "serene", "quiet", "relaxed", "meditation"],
            Category::Anxious => &["worried", "anxious", "nervous", "scared", "fear", "stress"],
        }
    }

    /// Emotion label shown when this category dominates
    pub fn emotion(&self) -> Emotion {
        match self {
            Category::Joy => Emotion::Joyful,
            Category::Sad => Emotion::Melancholic,
            Category::Angry => Emotion::Intense,
            Category::Calm => Emotion::Peaceful,
            Category::Anxious => Emotion::Restless,
        }
    }

    pub fn color(&self) -> Rgb {
        self.emotion().color()
    }

    /// Number of this category's keywords contained in `lowered` (substring match)
    ///
    /// Each keyword counts at most once regardless of how often it occurs.
    pub fn count_in(&self, lowered: &str) -> u32 {
        self.keywords()
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .count() as u32
    }
}
