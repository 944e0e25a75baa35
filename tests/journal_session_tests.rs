// Integration tests for the journal session
//
// Tests cover:
// - Commit and edit of moments
// - Session reset
// - Timer supersession and stale events
// - Memory triggers and ambient comments

use std::sync::Arc;

use moodlog::config::EngineConfig;
use moodlog::error::AppError;
use moodlog::models::moment::MomentId;
use moodlog::models::mood::Emotion;
use moodlog::services::{JournalSession, ManualClock, TimerChannel, TimerFired};
use rstest::rstest;

fn session_with(config: EngineConfig) -> (JournalSession, ManualClock) {
    let clock = ManualClock::new();
    (JournalSession::new(config, Arc::new(clock.clone())), clock)
}

fn session() -> (JournalSession, ManualClock) {
    session_with(EngineConfig {
        ambient_seed: Some(42),
        ..EngineConfig::default()
    })
}

// ============ Moment Tests ============

#[test]
fn test_commit_captures_current_mood() {
    let (mut session, _clock) = session();

    let snapshot = session.on_text_changed("so calm and relaxed ");
    assert_eq!(snapshot.mood.emotion(), Emotion::Peaceful);

    // mid-word edits do not re-analyze
    session.on_text_changed("Hello world");
    let moment = session.on_commit_requested().expect("moment saved");

    assert_eq!(moment.text(), "Hello world");
    assert_eq!(moment.emotion(), Emotion::Peaceful);
    assert_eq!(moment.color().to_hex(), "#4ade80");
    assert_eq!(session.draft_text(), "");
    assert_eq!(session.list_moments(), vec![moment]);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t ")]
fn test_blank_commit_is_noop(#[case] text: &str) {
    let (mut session, _clock) = session();
    session.on_text_changed(text);

    assert!(session.on_commit_requested().is_none());
    assert!(session.list_moments().is_empty());
}

#[test]
fn test_commit_reverts_mood() {
    let (mut session, _clock) = session();
    session.on_text_changed("I hate this frustrating day ");
    assert_eq!(session.mood().emotion(), Emotion::Intense);

    session.on_commit_requested().unwrap();
    assert!(session.mood().is_neutral());
    assert!(session.pending_timer(TimerChannel::MoodRevert).is_none());
}

#[test]
fn test_commit_keeps_mood_without_auto_revert() {
    let (mut session, clock) = session_with(EngineConfig {
        auto_revert_mood: false,
        ..EngineConfig::default()
    });
    session.on_text_changed("I hate this frustrating day ");
    session.on_commit_requested().unwrap();

    clock.advance_ms(10_000);
    session.poll_timers();
    assert_eq!(session.mood().emotion(), Emotion::Intense);
}

#[test]
fn test_edit_changes_only_text() {
    let (mut session, clock) = session();
    session.on_text_changed("first thoughts of the morning ");
    let original = session.on_commit_requested().unwrap();

    clock.advance_ms(60_000);
    let edited = session
        .on_edit_requested(original.id(), "second thoughts")
        .unwrap();

    assert_eq!(edited.text(), "second thoughts");
    assert_eq!(edited.id(), original.id());
    assert_eq!(edited.created_at(), original.created_at());
    assert_eq!(edited.mood(), original.mood());
    assert_eq!(session.list_moments(), vec![edited]);
}

#[test]
fn test_edit_unknown_id() {
    let (mut session, _clock) = session();
    session.on_text_changed("something worth keeping ");
    let moment = session.on_commit_requested().unwrap();

    let result = session.on_edit_requested(MomentId(99), "nope");
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(session.list_moments(), vec![moment]);
}

#[test]
fn test_moment_ids_increase() {
    let (mut session, _clock) = session();
    let mut ids = Vec::new();
    for text in ["one entry here ", "two entries now ", "three entries total "] {
        session.on_text_changed(text);
        ids.push(session.on_commit_requested().unwrap().id());
    }
    assert_eq!(ids, vec![MomentId(1), MomentId(2), MomentId(3)]);
}

// ============ Reset Tests ============

#[test]
fn test_reset_is_idempotent() {
    let (mut session, _clock) = session();
    session.on_text_changed("ocean ocean ocean waves ");
    session.on_commit_requested().unwrap();
    session.on_text_changed("I am worried about the ocean ");

    session.reset_session();
    let once = session.snapshot();
    let moments_once = session.list_moments();

    session.reset_session();
    let twice = session.snapshot();

    assert_eq!(once, twice);
    assert_eq!(once.draft_text, "");
    assert!(once.mood.is_neutral());
    assert!(session.word_frequencies().is_empty());
    assert_eq!(session.list_moments(), moments_once);
    assert_eq!(moments_once.len(), 1);
    assert!(session.next_deadline().is_none());
}

// ============ Timer Tests ============

#[test]
fn test_rapid_keystrokes_revert_once() {
    let (mut session, clock) = session();

    session.on_text_changed("I feel so happy today ");
    let first = session.pending_timer(TimerChannel::MoodRevert).unwrap();

    clock.advance_ms(1_000);
    session.on_text_changed("I feel so happy today a");
    let second = session.pending_timer(TimerChannel::MoodRevert).unwrap();
    assert!(second.deadline > first.deadline);

    // the first keystroke's deadline passes without effect
    clock.advance_ms(2_000);
    assert!(!session.poll_timers().contains(&TimerFired::MoodReverted));
    assert_eq!(session.mood().emotion(), Emotion::Joyful);

    // a held copy of the superseded event is a ghost
    assert_eq!(session.fire(first), None);
    assert_eq!(session.mood().emotion(), Emotion::Joyful);

    clock.advance_ms(1_000);
    assert!(session.poll_timers().contains(&TimerFired::MoodReverted));
    assert!(session.mood().is_neutral());

    clock.advance_ms(10_000);
    assert!(!session.poll_timers().contains(&TimerFired::MoodReverted));
}

#[test]
fn test_attention_clears_after_idle() {
    let (mut session, clock) = session();
    session.on_text_changed("short ");
    assert!(session.is_attentive());

    clock.advance_ms(4_999);
    session.poll_timers();
    assert!(session.is_attentive());

    clock.advance_ms(1);
    assert!(session.poll_timers().contains(&TimerFired::AttentionCleared));
    assert!(!session.is_attentive());
}

#[test]
fn test_memory_trigger_shown_then_expires() {
    let (mut session, clock) = session();
    session.on_text_changed("whisper ");
    session.on_text_changed("whisper whisper ");
    assert!(session.memory_trigger().is_none());

    session.on_text_changed("whisper whisper whisper ");
    assert_eq!(
        session.memory_trigger(),
        Some("You've mentioned \"whisper\" 3 times - this seems significant to you")
    );

    clock.advance_ms(5_000);
    assert!(session.poll_timers().contains(&TimerFired::MemoryTriggerExpired));
    assert!(session.memory_trigger().is_none());

    // the next analysis shows the notice again with the latest count
    session.on_text_changed("whisper whisper whisper whisper ");
    assert_eq!(
        session.memory_trigger(),
        Some("You've mentioned \"whisper\" 4 times - this seems significant to you")
    );
    assert_eq!(session.word_frequencies().get("whisper"), Some(&4));
}

#[test]
fn test_memory_trigger_count_refreshes() {
    let (mut session, clock) = session();
    session.on_text_changed("whisper whisper whisper ");
    let first = session.pending_timer(TimerChannel::MemoryDisplay).unwrap();

    clock.advance_ms(2_000);
    session.on_text_changed("whisper whisper whisper whisper ");
    assert_eq!(
        session.memory_trigger(),
        Some("You've mentioned \"whisper\" 4 times - this seems significant to you")
    );
    let refreshed = session.pending_timer(TimerChannel::MemoryDisplay).unwrap();
    assert!(refreshed.deadline > first.deadline);

    // same notice, display timer left alone
    clock.advance_ms(1_000);
    session.on_text_changed("whisper whisper whisper whisper quiet ");
    let unchanged = session.pending_timer(TimerChannel::MemoryDisplay).unwrap();
    assert_eq!(unchanged, refreshed);

    clock.advance_ms(4_000);
    assert!(session.poll_timers().contains(&TimerFired::MemoryTriggerExpired));
    assert!(session.memory_trigger().is_none());
}

#[test]
fn test_accented_repeats_do_not_trigger() {
    let (mut session, _clock) = session();
    session.on_text_changed("résumé résumé résumé ");
    assert!(session.memory_trigger().is_none());
    assert!(session.word_frequencies().is_empty());
}

#[rstest]
#[case("happy day ", Emotion::Neutral)]
#[case("happy days ", Emotion::Joyful)]
fn test_analysis_needs_more_than_ten_chars(#[case] text: &str, #[case] expected: Emotion) {
    let (mut session, _clock) = session();
    let snapshot = session.on_text_changed(text);
    assert_eq!(snapshot.mood.emotion(), expected);
}

#[test]
fn test_ambient_comments_follow_draft_length() {
    let (mut session, clock) = session();
    session.on_text_changed("too short ");
    assert!(session.pending_timer(TimerChannel::AmbientComment).is_none());

    session.on_text_changed("long enough to be noticed ");
    clock.advance_ms(7_000);
    let fired = session.poll_timers();
    let comment = fired
        .iter()
        .find_map(|e| match e {
            TimerFired::AmbientComment(text) => Some(text.clone()),
            _ => None,
        })
        .expect("ambient comment fired");
    assert!(moodlog::services::AMBIENT_COMMENTS.contains(&comment.as_str()));
    assert_eq!(session.visible_comment(), Some(comment.as_str()));

    clock.advance_ms(4_000);
    assert!(session.poll_timers().contains(&TimerFired::AmbientCommentHidden));
    assert_eq!(session.visible_comment(), None);
    assert_eq!(session.ambient_log(), vec![comment]);

    // shrinking below the threshold stops and clears comments
    session.on_text_changed("short");
    assert!(session.ambient_log().is_empty());
    assert!(session.pending_timer(TimerChannel::AmbientComment).is_none());
}

#[test]
fn test_ambient_log_is_capped() {
    let (mut session, clock) = session();
    session.on_text_changed("long enough to be noticed ");
    for _ in 0..8 {
        clock.advance_ms(7_000);
        session.poll_timers();
    }
    assert_eq!(session.ambient_log().len(), 5);
}

#[test]
fn test_seeded_comments_are_deterministic() {
    let run = || {
        let (mut session, clock) = session();
        session.on_text_changed("long enough to be noticed ");
        for _ in 0..4 {
            clock.advance_ms(7_000);
            session.poll_timers();
        }
        session.ambient_log()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_reset_drops_pending_timers() {
    let (mut session, clock) = session();
    session.on_text_changed("long enough and so happy ");
    assert!(session.next_deadline().is_some());

    session.reset_session();
    clock.advance_ms(30_000);
    assert!(session.poll_timers().is_empty());
    assert!(session.snapshot().ambient_log.is_empty());
}
