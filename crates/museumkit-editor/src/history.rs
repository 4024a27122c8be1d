//! Bounded snapshot history
//!
//! Every entry stores a full copy of the editable state. The cursor points
//! at the entry matching the current state; undo and redo move it and hand
//! back the snapshot to restore. The oldest entries are evicted once the
//! configured capacity is exceeded.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use museumkit_core::{ElementId, Floor, InvariantViolation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::selection::Selection;

/// Description given to the state that existed before the first commit
pub const INITIAL_STATE_DESCRIPTION: &str = "Initial state";

/// The part of the editor state that undo/redo restores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub floors: Vec<Floor>,
    pub current_floor_id: Option<ElementId>,
    #[serde(default)]
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub snapshot: Snapshot,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(snapshot: Snapshot, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            snapshot,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    index: usize,
    max_size: usize,
}

impl History {
    /// Create an empty history keeping at most `max_size` snapshots
    ///
    /// At least two are always kept so one step can be undone.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: 0,
            max_size: max_size.max(2),
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Record the transition from `previous` to `next`.
    ///
    /// The first call also records `previous` so the very first commit can
    /// be undone. Anything that was undone beyond the cursor is discarded.
    pub fn add(&mut self, previous: &Snapshot, next: Snapshot, description: impl Into<String>) {
        let description = description.into();
        if self.entries.is_empty() {
            self.entries
                .push_back(HistoryEntry::new(previous.clone(), INITIAL_STATE_DESCRIPTION));
            self.index = 0;
        }

        let dropped = self.entries.len() - (self.index + 1);
        self.entries.truncate(self.index + 1);
        if dropped > 0 {
            tracing::debug!(dropped, "discarded redo entries");
        }

        self.entries.push_back(HistoryEntry::new(next, description.clone()));
        while self.entries.len() > self.max_size {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!(description = %evicted.description, "evicted oldest history entry");
            }
        }
        self.index = self.entries.len() - 1;
        tracing::debug!(%description, index = self.index, len = self.entries.len(), "history entry added");
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Step back one entry and return the snapshot to restore
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index).map(|e| e.snapshot.clone())
    }

    /// Step forward one entry and return the snapshot to restore
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).map(|e| e.snapshot.clone())
    }

    /// Label of the action an undo would revert
    pub fn undo_description(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.entries.get(self.index).map(|e| e.description.as_str())
    }

    /// Label of the action a redo would reapply
    pub fn redo_description(&self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.entries.get(self.index + 1).map(|e| e.description.as_str())
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.index).map(|e| &e.snapshot)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }

    /// Verify the cursor points at an existing entry
    pub fn check_cursor(&self) -> Result<(), InvariantViolation> {
        if self.entries.is_empty() && self.index == 0 {
            return Ok(());
        }
        if self.index >= self.entries.len() || self.entries.len() > self.max_size {
            return Err(InvariantViolation::HistoryCursor {
                index: self.index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(museumkit_settings::HistorySettings::default().max_size)
    }
}
