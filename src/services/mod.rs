//! 服务模块

pub mod affect;
pub mod classifier;
pub mod clock;
pub mod driver;
pub mod lexicon;
pub mod memory_tracker;
pub mod moment_store;
pub mod scheduler;
pub mod session;

pub use affect::AffectScorer;
pub use classifier::{CategoryScores, Classification, MoodClassifier};
pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use driver::SessionDriver;
pub use lexicon::Category;
pub use memory_tracker::{MemoryTracker, MemoryTrigger, normalize_word};
pub use moment_store::{InMemoryMomentStore, MomentStore, create_moment_store};
pub use scheduler::{ScheduledEvent, Scheduler, TimerChannel};
pub use session::{
    AMBIENT_COMMENTS, JournalSession, SessionSnapshot, TimerFired, create_journal_session,
};
