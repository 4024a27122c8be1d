//! Editor state store.
//!
//! All changes to the plan go through [`EditorState::update_state`], which
//! replaces whole values and checks the internal invariants before
//! accepting them. Typed commands built on top of it validate placements
//! first.
//!
//! This module is split into submodules:
//! - `elements`: add rooms, walls, doors, artworks, links and floors
//! - `deletion`: cascade deletion preview and commit
//! - `history`: undo/redo
//! - `gesture`: gesture lifecycle and vertical link corner drags
//! - `transforms`: room translation and vertex editing
//! - `view`: selection, tool, viewport and room drawing

mod deletion;
mod elements;
mod gesture;
mod history;
mod transforms;
mod view;

use museumkit_core::{check_floors, ElementId, Floor, InvariantViolation, PlanDocument, Point};
use museumkit_settings::EditorConfig;
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::history::{History, Snapshot};
use crate::selection::Selection;
use crate::validation::{ValidationContext, ValidationResult};
use crate::viewport::Viewport;

use gesture::Gesture;

/// Active drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    #[default]
    Select,
    Room,
    Wall,
    Door,
    Artwork,
    VerticalLink,
    Pan,
}

/// Partial replacement of the editable state
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub floors: Option<Vec<Floor>>,
    pub current_floor_id: Option<ElementId>,
    pub selection: Option<Selection>,
    /// History label, used when the update is saved
    pub description: Option<String>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floors(mut self, floors: Vec<Floor>) -> Self {
        self.floors = Some(floors);
        self
    }

    pub fn current_floor(mut self, floor_id: ElementId) -> Self {
        self.current_floor_id = Some(floor_id);
        self
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The editor state
#[derive(Debug, Clone)]
pub struct EditorState {
    floors: Vec<Floor>,
    current_floor_id: ElementId,
    selection: Selection,
    pub(crate) viewport: Viewport,
    pub(crate) tool: Tool,
    /// Room outline being drawn, not yet committed
    pub(crate) current_polygon: Vec<Point>,
    pub(crate) history: History,
    pub(crate) config: EditorConfig,
    /// Treat validation warnings as blocking
    pub(crate) strict_mode: bool,
    /// Last state that was committed, restored by cancellation
    committed: Snapshot,
    pub(crate) gesture: Option<Gesture>,
}

impl EditorState {
    /// Fresh editor with a single empty ground floor
    pub fn new(config: EditorConfig) -> Self {
        let ground = Floor::new(crate::naming::floor_name(0), 0);
        let current_floor_id = ground.id.clone();
        let floors = vec![ground];
        Self {
            committed: Snapshot {
                floors: floors.clone(),
                current_floor_id: Some(current_floor_id.clone()),
                selection: Selection::new(),
            },
            floors,
            current_floor_id,
            selection: Selection::new(),
            viewport: Viewport::from_config(&config),
            tool: Tool::default(),
            current_polygon: Vec::new(),
            history: History::new(config.history.max_size),
            config,
            strict_mode: false,
            gesture: None,
        }
    }

    /// Load a plan handed over by the host
    ///
    /// The current floor defaults to the first floor when the document
    /// names none.
    pub fn from_document(document: PlanDocument, config: EditorConfig) -> EditorResult<Self> {
        let current = document
            .current_floor_id
            .clone()
            .or_else(|| document.floors.first().map(|f| f.id.clone()))
            .ok_or_else(|| EditorError::Invariant(InvariantViolation::NoFloors.report()))?;
        let mut editor = Self::new(config);
        editor.update_state(
            StateUpdate::new().floors(document.floors).current_floor(current),
            false,
        )?;
        Ok(editor)
    }

    /// Hand the plan back to the host
    pub fn to_document(&self) -> PlanDocument {
        PlanDocument {
            floors: self.floors.clone(),
            current_floor_id: Some(self.current_floor_id.clone()),
        }
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, id: &ElementId) -> Option<&Floor> {
        self.floors.iter().find(|f| &f.id == id)
    }

    pub fn current_floor_id(&self) -> &ElementId {
        &self.current_floor_id
    }

    pub fn current_floor(&self) -> &Floor {
        // update_state guarantees the current floor resolves
        self.floors
            .iter()
            .find(|f| f.id == self.current_floor_id)
            .unwrap_or(&self.floors[0])
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    pub fn set_strict_mode(&mut self, strict_mode: bool) {
        self.strict_mode = strict_mode;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Copy of the editable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            floors: self.floors.clone(),
            current_floor_id: Some(self.current_floor_id.clone()),
            selection: self.selection.clone(),
        }
    }

    /// Whether the live state differs from the last commit
    pub fn is_dirty(&self) -> bool {
        self.snapshot() != self.committed
    }

    /// Validation context for the current floor
    pub fn validation_context(&self) -> ValidationContext<'_> {
        ValidationContext::new(self.current_floor(), &self.config).with_floors(&self.floors)
    }

    /// Single mutation entry point.
    ///
    /// Fields absent from `update` keep their value. The merged state is
    /// checked against the internal invariants and rejected as a whole when
    /// any fails. With `save_history` the previous committed state and the
    /// new one are recorded as one undoable step; without it the change is
    /// live only, as during a drag.
    pub fn update_state(&mut self, update: StateUpdate, save_history: bool) -> EditorResult<()> {
        let StateUpdate {
            floors,
            current_floor_id,
            selection,
            description,
        } = update;

        let floors = floors.unwrap_or_else(|| self.floors.clone());
        let current_floor_id = current_floor_id.unwrap_or_else(|| self.current_floor_id.clone());
        let mut selection = selection.unwrap_or_else(|| self.selection.clone());

        check_state(&floors, &current_floor_id).map_err(|v| EditorError::Invariant(v.report()))?;
        if let Some(floor) = floors.iter().find(|f| f.id == current_floor_id) {
            selection.retain_existing(floor);
        }

        self.floors = floors;
        self.current_floor_id = current_floor_id;
        self.selection = selection;

        if save_history {
            let description = description.unwrap_or_else(|| "Edit".to_string());
            let next = self.snapshot();
            self.history.add(&self.committed, next.clone(), description.as_str());
            self.history
                .check_cursor()
                .map_err(|v| EditorError::Invariant(v.report()))?;
            self.committed = next;
            tracing::info!(%description, "state committed");
        } else if self.gesture.is_none() {
            self.committed = self.snapshot();
        }
        Ok(())
    }

    /// Restore a snapshot without recording history
    pub(crate) fn restore(&mut self, snapshot: Snapshot) -> EditorResult<()> {
        let current = snapshot
            .current_floor_id
            .clone()
            .filter(|id| snapshot.floors.iter().any(|f| &f.id == id))
            .or_else(|| snapshot.floors.first().map(|f| f.id.clone()))
            .ok_or_else(|| EditorError::Invariant(InvariantViolation::NoFloors.report()))?;
        check_state(&snapshot.floors, &current).map_err(|v| EditorError::Invariant(v.report()))?;
        self.floors = snapshot.floors;
        self.current_floor_id = current;
        self.selection = snapshot.selection;
        self.committed = self.snapshot();
        Ok(())
    }

    /// Reject a blocking verdict under the configured strictness
    pub(crate) fn ensure_accepted(&self, result: ValidationResult, strict: bool) -> EditorResult<ValidationResult> {
        if result.blocks_commit(strict) {
            tracing::warn!(code = %result.code, message = %result.message, "placement rejected");
            return Err(EditorError::PlacementRejected(result));
        }
        Ok(result)
    }

    /// Fail when a gesture is in progress
    pub(crate) fn ensure_idle(&self) -> EditorResult<()> {
        if self.gesture.is_some() {
            return Err(EditorError::GestureActive);
        }
        Ok(())
    }

    pub(crate) fn current_floor_index(&self) -> usize {
        self.floors
            .iter()
            .position(|f| f.id == self.current_floor_id)
            .unwrap_or(0)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

fn check_state(floors: &[Floor], current_floor_id: &ElementId) -> Result<(), InvariantViolation> {
    if floors.is_empty() {
        return Err(InvariantViolation::NoFloors);
    }
    if !floors.iter().any(|f| &f.id == current_floor_id) {
        return Err(InvariantViolation::DanglingCurrentFloor {
            floor_id: current_floor_id.to_string(),
        });
    }
    check_floors(floors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use museumkit_core::{Room, Wall};

    #[test]
    fn test_new_editor_has_ground_floor() {
        let editor = EditorState::default();
        assert_eq!(editor.floors().len(), 1);
        assert_eq!(editor.current_floor().level, 0);
        assert!(!editor.history().can_undo());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_update_rejects_invariant_violations() {
        let mut editor = EditorState::default();
        let err = editor
            .update_state(StateUpdate::new().floors(Vec::new()), true)
            .unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(editor.floors().len(), 1);

        let err = editor
            .update_state(StateUpdate::new().current_floor("missing".into()), false)
            .unwrap_err();
        assert!(matches!(
            err,
            EditorError::Invariant(InvariantViolation::DanglingCurrentFloor { .. })
        ));

        let mut floors = editor.floors().to_vec();
        floors[0].walls.push(
            Wall::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0), 0.2).with_room("ghost"),
        );
        assert!(editor
            .update_state(StateUpdate::new().floors(floors), true)
            .is_err());
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_update_with_history_is_undoable() {
        let mut editor = EditorState::default();
        let mut floors = editor.floors().to_vec();
        floors[0]
            .rooms
            .push(Room::rectangle("Hall", Point::new(0.0, 0.0), Point::new(4.0, 4.0)));
        editor
            .update_state(StateUpdate::new().floors(floors).describe("Add hall"), true)
            .unwrap();
        assert_eq!(editor.history().undo_description(), Some("Add hall"));
        assert_eq!(editor.current_floor().rooms.len(), 1);
    }

    #[test]
    fn test_document_round_trip() {
        let mut floor = Floor::new("Level 2", 2).with_id("f2");
        floor
            .rooms
            .push(Room::rectangle("Hall", Point::new(0.0, 0.0), Point::new(4.0, 4.0)));
        let doc = PlanDocument::new(vec![floor]);
        let editor = EditorState::from_document(doc, EditorConfig::default()).unwrap();
        assert_eq!(editor.current_floor_id().as_str(), "f2");
        assert_eq!(editor.to_document().floors[0].rooms.len(), 1);

        let empty = PlanDocument::new(Vec::new());
        assert!(EditorState::from_document(empty, EditorConfig::default()).is_err());
    }
}
