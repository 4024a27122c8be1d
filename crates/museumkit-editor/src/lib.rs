//! # MuseumKit Editor
//!
//! The editing engine behind the floor plan canvas. It keeps every placed
//! element physically and logically consistent, resolves cascading
//! deletions and records undoable history.
//!
//! ## Core Components
//!
//! - **Geometry**: areas, containment, intersections and distances over
//!   plan coordinates
//! - **Snapping**: grid and element snapping with ranked candidates
//! - **Validation**: placement rules for rooms, walls, doors, artworks and
//!   vertical links, returned as values
//! - **Cascade**: deletion plans with removal priorities and orphan
//!   detection, and their application
//! - **History**: bounded snapshot undo/redo
//! - **Naming**: default floor, room and vertical link names
//! - **Editor state**: the single mutation entry point tying it together
//!
//! ## Architecture
//!
//! ```text
//! EditorState (update_state, commands, gestures)
//!   ├── Validation ── Geometry
//!   ├── Cascade ───── Geometry, Validation
//!   ├── History (snapshots of floors + selection)
//!   ├── Selection
//!   └── Viewport
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use museumkit_editor::EditorState;
//! use museumkit_core::{Point, Room};
//!
//! let mut editor = EditorState::new(Default::default());
//! let room = Room::rectangle("Gallery", Point::new(0.0, 0.0), Point::new(8.0, 6.0));
//! editor.add_room(room)?;
//! editor.undo()?;
//! ```

pub mod cascade;
pub mod editor_state;
pub mod error;
pub mod geometry;
pub mod history;
pub mod naming;
pub mod selection;
pub mod snap;
pub mod validation;
pub mod viewport;

pub use cascade::{
    analyze_deletion_plan, analyze_deletion_plan_with, commit_deletion, CascadeMember, DeletionPlan,
    DeletionResult, DeletionTarget, EstimatedImpact, OrphanedElement, OrphanedLink,
};
pub use editor_state::{EditorState, StateUpdate, Tool};
pub use error::{EditorError, EditorResult};
pub use history::{History, HistoryEntry, Snapshot};
pub use selection::{SelectedElement, Selection};
pub use snap::{snap_point, snap_to_grid, SnapCandidate, SnapKind, SnapOptions};
pub use validation::{
    validate_artwork_placement, validate_door_placement, validate_element,
    validate_point_addition, validate_point_removal, validate_room_placement,
    validate_vertical_link_corner_placement, validate_vertical_link_placement,
    validate_vertical_link_translation,
    validate_wall_placement, Severity, ValidationCode, ValidationContext, ValidationResult,
};
pub use viewport::Viewport;
