//! Journal Session
//!
//! The explicit session context: owns the draft, mood, derived profiles,
//! word memory, timers and the moment store, and applies one event at a
//! time. Every timer callback is checked against the current session
//! generation and the channel's live timer before it may touch state.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{AppError, Result};
use crate::models::draft::Draft;
use crate::models::moment::{Moment, MomentId};
use crate::models::mood::MoodState;
use crate::models::profile::{AffectProfile, TraitProfile};
use crate::services::affect::AffectScorer;
use crate::services::classifier::MoodClassifier;
use crate::services::clock::{Clock, SystemClock};
use crate::services::memory_tracker::MemoryTracker;
use crate::services::moment_store::{MomentStore, create_moment_store};
use crate::services::scheduler::{ScheduledEvent, Scheduler, TimerChannel};

/// Encouragements shown while the user is composing
pub const AMBIENT_COMMENTS: [&str; 8] = [
    "I sense deep reflection here...",
    "Your emotions are flowing freely",
    "This feels authentic and raw",
    "You're exploring something important",
    "There's growth in these words",
    "I'm listening closely",
    "Your vulnerability is beautiful",
    "This moment matters",
];

/// Everything the renderer needs after an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub draft_text: String,
    pub mood: MoodState,
    pub traits: TraitProfile,
    pub affect: AffectProfile,
    pub memory_trigger: Option<String>,
    pub attention: bool,
    pub ambient_log: Vec<String>,
    pub visible_comment: Option<String>,
    pub recent_words: Vec<String>,
}

/// Observable effect of a timer firing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TimerFired {
    AttentionCleared,
    MoodReverted,
    AmbientComment(String),
    MemoryTriggerExpired,
    AmbientCommentHidden,
}

pub struct JournalSession {
    id: Uuid,
    generation: u64,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    classifier: MoodClassifier,
    tracker: MemoryTracker,
    store: Box<dyn MomentStore>,
    scheduler: Scheduler,
    rng: StdRng,

    draft: Draft,
    /// Number of leading draft words already fed to the tracker
    observed_words: usize,
    mood: MoodState,
    traits: TraitProfile,
    affect: AffectProfile,
    memory_trigger: Option<String>,
    attention: bool,
    ambient_log: VecDeque<String>,
    ambient_visible: bool,
    recent_words: VecDeque<String>,
}

impl JournalSession {
    pub fn new(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self::with_store(config, clock, create_moment_store())
    }

    pub fn with_store(
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        store: Box<dyn MomentStore>,
    ) -> Self {
        let rng = match config.ambient_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = Self {
            id: Uuid::new_v4(),
            generation: 1,
            classifier: MoodClassifier::new(config.fallback_word_threshold),
            tracker: MemoryTracker::new(
                config.memory_min_word_length,
                config.memory_trigger_threshold,
            ),
            store,
            scheduler: Scheduler::new(),
            rng,
            draft: Draft::default(),
            observed_words: 0,
            mood: MoodState::neutral(),
            traits: TraitProfile::default(),
            affect: AffectProfile::default(),
            memory_trigger: None,
            attention: false,
            ambient_log: VecDeque::with_capacity(config.ambient_log_capacity),
            ambient_visible: false,
            recent_words: VecDeque::with_capacity(config.recent_words_capacity),
            clock,
            config,
        };
        tracing::info!("Journal session {} started", session.id);
        session
    }

    // ===== External interface =====

    /// Apply the full current text of the input
    ///
    /// Analysis only runs when the text ends on a word boundary and is longer
    /// than the configured minimum.
    pub fn on_text_changed(&mut self, raw: &str) -> SessionSnapshot {
        let now = self.clock.now();
        self.draft.set_text(raw);

        let word_count = self.draft.words().len();
        if word_count < self.observed_words {
            self.observed_words = word_count;
        }

        if self.draft.ends_at_word_boundary() {
            let last_word = self.draft.words().last().map(|w| w.to_string());
            if let Some(last) = last_word {
                self.push_recent_word(last);
                self.attention = true;
                self.scheduler
                    .arm(TimerChannel::Attention, now + self.config.attention_idle(), self.generation);
            }

            if self.draft.len() > self.config.min_analysis_length {
                self.analyze(now);
            }
        }

        if self.config.auto_revert_mood {
            if self.mood.is_neutral() {
                self.scheduler.cancel(TimerChannel::MoodRevert);
            } else {
                self.scheduler
                    .arm(TimerChannel::MoodRevert, now + self.config.mood_revert(), self.generation);
            }
        }

        self.update_ambient(now);
        self.snapshot()
    }

    /// Save the draft as a moment; blank drafts are ignored
    pub fn on_commit_requested(&mut self) -> Option<Moment> {
        if self.draft.is_blank() {
            tracing::debug!("Ignoring commit of blank draft");
            return None;
        }

        let moment = self
            .store
            .commit(self.draft.text(), self.mood, self.clock.wall_time())?;

        self.clear_composition();
        if self.config.auto_revert_mood {
            self.scheduler.cancel(TimerChannel::MoodRevert);
            self.mood = MoodState::neutral();
        }
        Some(moment)
    }

    pub fn on_edit_requested(&mut self, id: MomentId, new_text: &str) -> Result<Moment> {
        self.store.edit(id, new_text).inspect_err(|e| {
            tracing::warn!("Failed to edit moment {}: {}", id, e);
        })
    }

    pub fn list_moments(&self) -> Vec<Moment> {
        self.store.list()
    }

    /// Finish the entry without saving a moment
    pub fn finish_entry(&mut self) -> Result<()> {
        if self.draft.is_empty() {
            return Err(AppError::Validation("Write something first!".to_string()));
        }
        tracing::info!("Finished entry in session {}", self.id);
        self.clear_composition();
        Ok(())
    }

    /// Return to a fresh session; committed moments are kept
    pub fn reset_session(&mut self) {
        self.generation += 1;
        self.scheduler.cancel_all();

        self.draft.clear();
        self.observed_words = 0;
        self.mood = MoodState::neutral();
        self.traits = TraitProfile::default();
        self.affect = AffectProfile::default();
        self.tracker.clear();
        self.memory_trigger = None;
        self.attention = false;
        self.ambient_log.clear();
        self.ambient_visible = false;
        self.recent_words.clear();

        tracing::info!(
            "Session {} reset (generation {})",
            self.id,
            self.generation
        );
    }

    // ===== Timers =====

    /// Fire every timer that is due at the clock's current time
    pub fn poll_timers(&mut self) -> Vec<TimerFired> {
        let now = self.clock.now();
        self.scheduler
            .take_due(now)
            .into_iter()
            .filter_map(|event| self.dispatch(event, now))
            .collect()
    }

    /// Deliver a timer event held outside the scheduler
    ///
    /// Events from an earlier generation, or superseded on their channel,
    /// are dropped.
    pub fn fire(&mut self, event: ScheduledEvent) -> Option<TimerFired> {
        if !self.scheduler.is_current(&event) {
            tracing::debug!("Dropping superseded {:?} timer #{}", event.channel, event.seq);
            return None;
        }
        self.scheduler.cancel(event.channel);
        self.dispatch(event, self.clock.now())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn pending_timer(&self, channel: TimerChannel) -> Option<ScheduledEvent> {
        self.scheduler.pending(channel)
    }

    fn dispatch(&mut self, event: ScheduledEvent, now: Instant) -> Option<TimerFired> {
        if event.generation != self.generation {
            tracing::debug!(
                "Dropping {:?} timer from generation {} (current {})",
                event.channel,
                event.generation,
                self.generation
            );
            return None;
        }

        match event.channel {
            TimerChannel::Attention => {
                if !self.attention {
                    return None;
                }
                self.attention = false;
                Some(TimerFired::AttentionCleared)
            }
            TimerChannel::MoodRevert => {
                if self.mood.is_neutral() {
                    return None;
                }
                tracing::debug!("Mood {} reverted to neutral", self.mood.emotion());
                self.mood = MoodState::neutral();
                Some(TimerFired::MoodReverted)
            }
            TimerChannel::AmbientComment => {
                if self.draft.len() < self.config.ambient_min_length {
                    return None;
                }
                let comment = AMBIENT_COMMENTS[self.rng.gen_range(0..AMBIENT_COMMENTS.len())];
                self.push_ambient_comment(comment.to_string());
                self.ambient_visible = true;
                self.scheduler.arm(
                    TimerChannel::AmbientDisplay,
                    now + self.config.ambient_display(),
                    self.generation,
                );
                self.scheduler.arm(
                    TimerChannel::AmbientComment,
                    now + self.config.ambient_period(),
                    self.generation,
                );
                Some(TimerFired::AmbientComment(comment.to_string()))
            }
            TimerChannel::MemoryDisplay => self
                .memory_trigger
                .take()
                .map(|_| TimerFired::MemoryTriggerExpired),
            TimerChannel::AmbientDisplay => {
                if !self.ambient_visible {
                    return None;
                }
                self.ambient_visible = false;
                Some(TimerFired::AmbientCommentHidden)
            }
        }
    }

    // ===== Internals =====

    fn analyze(&mut self, now: Instant) {
        let classification = self.classifier.classify(self.draft.text());
        let (traits, affect) = AffectScorer::score(&classification);
        self.mood = classification.mood;
        self.traits = traits;
        self.affect = affect;

        let words = self.draft.words();
        let fresh = &words[self.observed_words.min(words.len())..];
        let trigger = self.tracker.observe(fresh.iter().copied());
        self.observed_words = words.len();

        if let Some(trigger) = trigger {
            let message = trigger.message();
            // the display timer restarts only when the notice changes
            if self.memory_trigger.as_deref() != Some(message.as_str()) {
                tracing::info!("Memory triggered by \"{}\" ({} times)", trigger.word, trigger.count);
                self.memory_trigger = Some(message);
                self.scheduler.arm(
                    TimerChannel::MemoryDisplay,
                    now + self.config.memory_display(),
                    self.generation,
                );
            }
        }

        tracing::debug!(
            "Analyzed draft: {} words, mood {}",
            classification.stats.word_count,
            self.mood.emotion()
        );
    }

    fn update_ambient(&mut self, now: Instant) {
        if self.draft.len() >= self.config.ambient_min_length {
            if !self.scheduler.is_armed(TimerChannel::AmbientComment) {
                self.scheduler.arm(
                    TimerChannel::AmbientComment,
                    now + self.config.ambient_period(),
                    self.generation,
                );
            }
        } else {
            self.stop_ambient();
        }
    }

    fn stop_ambient(&mut self) {
        self.scheduler.cancel(TimerChannel::AmbientComment);
        self.scheduler.cancel(TimerChannel::AmbientDisplay);
        self.ambient_log.clear();
        self.ambient_visible = false;
    }

    /// Reset everything tied to the entry being composed
    fn clear_composition(&mut self) {
        self.draft.clear();
        self.observed_words = 0;
        self.stop_ambient();
        self.scheduler.cancel(TimerChannel::MemoryDisplay);
        self.memory_trigger = None;
        self.scheduler.cancel(TimerChannel::Attention);
        self.attention = false;
        self.recent_words.clear();
    }

    fn push_recent_word(&mut self, word: String) {
        if self.recent_words.len() == self.config.recent_words_capacity {
            self.recent_words.pop_front();
        }
        self.recent_words.push_back(word);
    }

    fn push_ambient_comment(&mut self, comment: String) {
        if self.ambient_log.len() == self.config.ambient_log_capacity {
            self.ambient_log.pop_front();
        }
        self.ambient_log.push_back(comment);
    }

    // ===== Accessors =====

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.to_string(),
            draft_text: self.draft.text().to_string(),
            mood: self.mood,
            traits: self.traits,
            affect: self.affect,
            memory_trigger: self.memory_trigger.clone(),
            attention: self.attention,
            ambient_log: self.ambient_log.iter().cloned().collect(),
            visible_comment: self.visible_comment().map(str::to_string),
            recent_words: self.recent_words.iter().cloned().collect(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn draft_text(&self) -> &str {
        self.draft.text()
    }

    pub fn mood(&self) -> MoodState {
        self.mood
    }

    pub fn traits(&self) -> TraitProfile {
        self.traits
    }

    pub fn affect(&self) -> AffectProfile {
        self.affect
    }

    pub fn memory_trigger(&self) -> Option<&str> {
        self.memory_trigger.as_deref()
    }

    pub fn is_attentive(&self) -> bool {
        self.attention
    }

    pub fn ambient_log(&self) -> Vec<String> {
        self.ambient_log.iter().cloned().collect()
    }

    pub fn visible_comment(&self) -> Option<&str> {
        if self.ambient_visible {
            self.ambient_log.back().map(String::as_str)
        } else {
            None
        }
    }

    pub fn recent_words(&self) -> Vec<String> {
        self.recent_words.iter().cloned().collect()
    }

    pub fn word_frequencies(&self) -> &IndexMap<String, u32> {
        self.tracker.frequencies()
    }
}

/// Create a session on the system clock
pub fn create_journal_session(config: EngineConfig) -> JournalSession {
    JournalSession::new(config, Arc::new(SystemClock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mood::Emotion;
    use crate::services::clock::ManualClock;

    fn session() -> (JournalSession, ManualClock) {
        let clock = ManualClock::new();
        let config = EngineConfig {
            ambient_seed: Some(7),
            ..EngineConfig::default()
        };
        (JournalSession::new(config, Arc::new(clock.clone())), clock)
    }

    #[test]
    fn test_analysis_waits_for_word_boundary() {
        let (mut session, _clock) = session();

        let snapshot = session.on_text_changed("I am so happy");
        assert_eq!(snapshot.mood.emotion(), Emotion::Neutral);
        assert!(!snapshot.attention);

        let snapshot = session.on_text_changed("I am so happy ");
        assert_eq!(snapshot.mood.emotion(), Emotion::Joyful);
        assert!(snapshot.attention);
    }

    #[test]
    fn test_short_text_not_analyzed() {
        let (mut session, _clock) = session();
        // 9 characters, boundary reached but under the minimum length
        let snapshot = session.on_text_changed("sad day. ");
        assert_eq!(snapshot.mood.emotion(), Emotion::Neutral);
        assert!(snapshot.attention);
        assert_eq!(snapshot.recent_words, vec!["day."]);
    }

    #[test]
    fn test_words_fed_to_tracker_once() {
        let (mut session, _clock) = session();
        let mut text = String::new();
        for word in ["whisper", "whisper", "whisper"] {
            for ch in word.chars() {
                text.push(ch);
                session.on_text_changed(&text);
            }
            text.push(' ');
            session.on_text_changed(&text);
        }
        assert_eq!(session.word_frequencies().get("whisper"), Some(&3));
        let trigger = session.memory_trigger().unwrap();
        assert!(trigger.contains("\"whisper\" 3 times"));
    }

    #[test]
    fn test_recent_words_window() {
        let (mut session, _clock) = session();
        let mut text = String::new();
        for i in 0..15 {
            text.push_str(&format!("w{} ", i));
            session.on_text_changed(&text);
        }
        let recent = session.recent_words();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first().map(String::as_str), Some("w5"));
        assert_eq!(recent.last().map(String::as_str), Some("w14"));
    }

    #[test]
    fn test_finish_entry() {
        let (mut session, _clock) = session();
        assert!(matches!(session.finish_entry(), Err(AppError::Validation(_))));

        session.on_text_changed("a long enough entry to start comments ");
        assert!(session.pending_timer(TimerChannel::AmbientComment).is_some());

        session.finish_entry().unwrap();
        assert_eq!(session.draft_text(), "");
        assert!(!session.is_attentive());
        assert!(session.recent_words().is_empty());
        assert!(session.pending_timer(TimerChannel::AmbientComment).is_none());
        assert!(session.pending_timer(TimerChannel::Attention).is_none());
        assert!(session.list_moments().is_empty());
    }

    #[test]
    fn test_event_held_across_reset_is_ignored() {
        let (mut session, clock) = session();
        session.on_text_changed("I feel so happy today ");
        let held = session.pending_timer(TimerChannel::MoodRevert).unwrap();

        session.reset_session();
        session.on_text_changed("I feel so happy today ");
        clock.advance_ms(3_000);

        // the held event belongs to the previous generation
        assert_eq!(session.fire(held), None);
        assert_eq!(session.mood().emotion(), Emotion::Joyful);
    }
}
