//! Async Session Driver
//!
//! Runs a [`JournalSession`] on tokio: a background task sleeps until the
//! session's next timer deadline and polls it. Operations that may re-arm
//! timers wake the task so it can pick up the new deadline. Dropping the
//! driver aborts the task, so no timer outlives its session.

use std::sync::Arc;
use tokio::sync::{Mutex, Notify, broadcast};
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::moment::{Moment, MomentId};
use crate::services::clock::TokioClock;
use crate::services::session::{JournalSession, SessionSnapshot, TimerFired};

/// Capacity of the timer event broadcast
const EVENT_BUFFER: usize = 64;

pub struct SessionDriver {
    session: Arc<Mutex<JournalSession>>,
    wake: Arc<Notify>,
    events: broadcast::Sender<TimerFired>,
    task: JoinHandle<()>,
}

impl SessionDriver {
    /// Start a session on tokio's clock and spawn its timer task
    pub fn start(config: EngineConfig) -> Self {
        Self::from_session(JournalSession::new(config, Arc::new(TokioClock::new())))
    }

    /// Drive an existing session; its clock must follow tokio time
    pub fn from_session(session: JournalSession) -> Self {
        let session = Arc::new(Mutex::new(session));
        let wake = Arc::new(Notify::new());
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        let task = tokio::spawn(run_timers(session.clone(), wake.clone(), events.clone()));

        Self {
            session,
            wake,
            events,
            task,
        }
    }

    /// Receive every timer effect fired from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TimerFired> {
        self.events.subscribe()
    }

    pub async fn on_text_changed(&self, raw: &str) -> SessionSnapshot {
        let snapshot = self.session.lock().await.on_text_changed(raw);
        self.wake.notify_one();
        snapshot
    }

    pub async fn on_commit_requested(&self) -> Option<Moment> {
        let moment = self.session.lock().await.on_commit_requested();
        self.wake.notify_one();
        moment
    }

    pub async fn on_edit_requested(&self, id: MomentId, new_text: &str) -> Result<Moment> {
        self.session.lock().await.on_edit_requested(id, new_text)
    }

    pub async fn list_moments(&self) -> Vec<Moment> {
        self.session.lock().await.list_moments()
    }

    pub async fn finish_entry(&self) -> Result<()> {
        let result = self.session.lock().await.finish_entry();
        self.wake.notify_one();
        result
    }

    pub async fn reset_session(&self) {
        self.session.lock().await.reset_session();
        self.wake.notify_one();
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Stop the timer task; pending timers never fire afterwards
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_timers(
    session: Arc<Mutex<JournalSession>>,
    wake: Arc<Notify>,
    events: broadcast::Sender<TimerFired>,
) {
    loop {
        let deadline = session.lock().await.next_deadline();
        match deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {
                        let fired = session.lock().await.poll_timers();
                        for effect in fired {
                            tracing::debug!("Timer fired: {:?}", effect);
                            // no subscribers is fine
                            let _ = events.send(effect);
                        }
                    }
                    _ = wake.notified() => {}
                }
            }
            None => wake.notified().await,
        }
    }
}
