//! Undo/redo

use super::EditorState;
use crate::error::{EditorError, EditorResult};

impl EditorState {
    /// Step back one history entry; `false` when there is nothing to undo
    pub fn undo(&mut self) -> EditorResult<bool> {
        self.ensure_idle()?;
        let Some(snapshot) = self.history.undo() else {
            return Ok(false);
        };
        self.restore(snapshot)?;
        self.current_polygon.clear();
        tracing::debug!(index = self.history.index(), "undo");
        Ok(true)
    }

    /// Step forward one history entry; `false` when there is nothing to redo
    pub fn redo(&mut self) -> EditorResult<bool> {
        self.ensure_idle()?;
        let Some(snapshot) = self.history.redo() else {
            return Ok(false);
        };
        self.restore(snapshot)?;
        self.current_polygon.clear();
        tracing::debug!(index = self.history.index(), "redo");
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.gesture.is_none() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.gesture.is_none() && self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    /// Drop all history, keeping the current state
    pub fn clear_history(&mut self) -> EditorResult<()> {
        if self.gesture.is_some() {
            return Err(EditorError::GestureActive);
        }
        self.history.clear();
        Ok(())
    }
}
