//! Moment Store
//!
//! Append-only, in-memory log of committed moments. The store is the only
//! owner of moment records; callers get copies.

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::moment::{Moment, MomentId};
use crate::models::mood::MoodState;

/// Moment persistence seam
pub trait MomentStore: Send + Sync {
    /// Append a moment; `None` when `text` trims to empty
    fn commit(&mut self, text: &str, mood: MoodState, created_at: DateTime<Utc>) -> Option<Moment>;

    /// Replace the text of an existing moment
    fn edit(&mut self, id: MomentId, new_text: &str) -> Result<Moment>;

    fn get(&self, id: MomentId) -> Option<Moment>;

    /// All moments in commit order
    fn list(&self) -> Vec<Moment>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vector-backed store with monotonic ids
#[derive(Debug, Default)]
pub struct InMemoryMomentStore {
    moments: Vec<Moment>,
    last_id: u64,
}

impl InMemoryMomentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: MomentId) -> Option<usize> {
        // ids are assigned in ascending order and never removed
        self.moments.binary_search_by_key(&id, Moment::id).ok()
    }
}

impl MomentStore for InMemoryMomentStore {
    fn commit(&mut self, text: &str, mood: MoodState, created_at: DateTime<Utc>) -> Option<Moment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.last_id += 1;
        let moment = Moment::new(MomentId(self.last_id), text.to_string(), mood, created_at);
        self.moments.push(moment.clone());

        tracing::info!(
            "Committed moment {} ({}, {} chars)",
            moment.id(),
            moment.emotion(),
            moment.text().chars().count()
        );
        Some(moment)
    }

    fn edit(&mut self, id: MomentId, new_text: &str) -> Result<Moment> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(format!("Moment not found: {}", id)))?;

        let text = new_text.trim();
        if text.is_empty() {
            return Err(AppError::Validation(
                "Moment text cannot be empty".to_string(),
            ));
        }

        let moment = &mut self.moments[index];
        moment.replace_text(text.to_string());
        tracing::info!("Edited moment {}", id);
        Ok(moment.clone())
    }

    fn get(&self, id: MomentId) -> Option<Moment> {
        self.position(id).map(|index| self.moments[index].clone())
    }

    fn list(&self) -> Vec<Moment> {
        self.moments.clone()
    }

    fn len(&self) -> usize {
        self.moments.len()
    }
}

/// Create the default moment store
pub fn create_moment_store() -> Box<dyn MomentStore> {
    Box::new(InMemoryMomentStore::new())
}
