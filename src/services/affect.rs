//! Affect Scorer
//!
//! Derives the trait sliders and the five-axis affect profile from surface
//! text statistics and the classifier's keyword counts. Display-only values,
//! but fully deterministic.

use crate::models::draft::TextStats;
use crate::models::profile::{AffectProfile, TraitProfile};
use crate::services::classifier::{CategoryScores, Classification};

pub struct AffectScorer;

impl AffectScorer {
    pub fn traits(stats: &TextStats, scores: &CategoryScores) -> TraitProfile {
        let words = stats.word_count as f64;
        let excl = stats.exclamation_count as f64;
        let question = stats.question_count as f64;

        TraitProfile::new(
            70.0 - 10.0 * excl - 15.0 * scores.angry as f64,
            30.0 + 10.0 * question + 5.0 * stats.avg_word_length,
            40.0 + words / 5.0 - 10.0 * scores.anxious as f64,
            30.0 + 10.0 * (scores.joy + scores.sad) as f64 + 5.0 * excl,
        )
    }

    pub fn affect(stats: &TextStats, scores: &CategoryScores) -> AffectProfile {
        let words = stats.word_count as f64;
        let excl = stats.exclamation_count as f64;
        let question = stats.question_count as f64;

        AffectProfile::new(
            30.0 + words / 2.0,
            8.0 * stats.avg_word_length,
            50.0 + 100.0 * stats.sentence_count as f64 / stats.word_divisor(),
            20.0 + 15.0 * question,
            30.0 + 10.0 * excl + 10.0 * scores.joy as f64,
        )
    }

    /// Both profiles for an existing classification
    pub fn score(classification: &Classification) -> (TraitProfile, AffectProfile) {
        (
            Self::traits(&classification.stats, &classification.scores),
            Self::affect(&classification.stats, &classification.scores),
        )
    }
}
