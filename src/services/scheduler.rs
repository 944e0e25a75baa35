//! Session Scheduler
//!
//! Timers are explicit event records on a monotonic clock. Each channel holds
//! at most one pending event: arming a channel replaces whatever was pending,
//! so a superseded timer can never fire.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Independent timer channels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimerChannel {
    /// Clears the thinking state after idle
    Attention,
    /// Reverts the mood to neutral after the last keystroke
    MoodRevert,
    /// Periodic ambient comment while composing
    AmbientComment,
    /// Hides the memory trigger notice
    MemoryDisplay,
    /// Hides the latest ambient comment
    AmbientDisplay,
}

impl TimerChannel {
    pub const ALL: [TimerChannel; 5] = [
        TimerChannel::Attention,
        TimerChannel::MoodRevert,
        TimerChannel::AmbientComment,
        TimerChannel::MemoryDisplay,
        TimerChannel::AmbientDisplay,
    ];
}

/// A pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub channel: TimerChannel,
    pub deadline: Instant,
    /// Session generation the event was armed in
    pub generation: u64,
    /// Arming sequence number, unique per scheduler
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: HashMap<TimerChannel, ScheduledEvent>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `channel`, replacing any pending event on it
    pub fn arm(&mut self, channel: TimerChannel, deadline: Instant, generation: u64) -> ScheduledEvent {
        self.next_seq += 1;
        let event = ScheduledEvent {
            channel,
            deadline,
            generation,
            seq: self.next_seq,
        };
        if let Some(previous) = self.pending.insert(channel, event) {
            tracing::debug!("Superseded {:?} timer #{}", channel, previous.seq);
        }
        event
    }

    pub fn cancel(&mut self, channel: TimerChannel) -> Option<ScheduledEvent> {
        self.pending.remove(&channel)
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_armed(&self, channel: TimerChannel) -> bool {
        self.pending.contains_key(&channel)
    }

    pub fn pending(&self, channel: TimerChannel) -> Option<ScheduledEvent> {
        self.pending.get(&channel).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `event` is still the live timer of its channel
    pub fn is_current(&self, event: &ScheduledEvent) -> bool {
        self.pending
            .get(&event.channel)
            .is_some_and(|pending| pending.seq == event.seq)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|event| event.deadline).min()
    }

    /// Remove and return every event due at `now`, earliest first
    ///
    /// Events with equal deadlines come out in arming order.
    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledEvent> {
        let mut due: Vec<ScheduledEvent> = self
            .pending
            .values()
            .filter(|event| event.deadline <= now)
            .copied()
            .collect();
        due.sort_by_key(|event| (event.deadline, event.seq));

        for event in &due {
            self.pending.remove(&event.channel);
        }
        due
    }
}
