//! Gesture lifecycle
//!
//! A gesture groups many live updates (a drag, a resize) into one history
//! step. Updates inside it use `save_history = false`; ending it records
//! the state from before the gesture against the final one.

use museumkit_core::{ElementId, ElementType, Point, VerticalLink};

use super::EditorState;
use crate::error::{EditorError, EditorResult};
use crate::history::Snapshot;
use crate::snap::{snap_point, SnapOptions};
use crate::validation::{validate_vertical_link_corner_placement, ValidationResult};

#[derive(Debug, Clone)]
pub(crate) enum GestureKind {
    Generic,
    LinkCorner {
        floor_id: ElementId,
        link_id: ElementId,
        corner_index: usize,
        /// Link as it was when the drag started
        original: VerticalLink,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct Gesture {
    /// Committed state when the gesture began
    pub(crate) origin: Snapshot,
    pub(crate) kind: GestureKind,
}

impl EditorState {
    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start grouping live updates into one undoable step
    pub fn begin_gesture(&mut self) -> EditorResult<()> {
        self.start(GestureKind::Generic)
    }

    /// Finish the gesture, recording it as one history entry.
    ///
    /// Returns `false` when nothing changed, in which case no entry is
    /// recorded.
    pub fn end_gesture(&mut self, description: &str) -> EditorResult<bool> {
        let gesture = self.gesture.take().ok_or(EditorError::NoActiveGesture)?;
        let next = self.snapshot();
        if next == gesture.origin {
            tracing::debug!(description, "gesture ended without changes");
            return Ok(false);
        }
        self.history.add(&gesture.origin, next.clone(), description);
        self.history
            .check_cursor()
            .map_err(|v| EditorError::Invariant(v.report()))?;
        self.committed = next;
        tracing::info!(description, "gesture committed");
        Ok(true)
    }

    /// Abandon the gesture and put back the state from before it
    pub fn cancel_gesture(&mut self) -> EditorResult<()> {
        let gesture = self.gesture.take().ok_or(EditorError::NoActiveGesture)?;
        self.restore(gesture.origin)?;
        tracing::debug!("gesture cancelled");
        Ok(())
    }

    fn start(&mut self, kind: GestureKind) -> EditorResult<()> {
        self.ensure_idle()?;
        self.gesture = Some(Gesture {
            origin: self.committed.clone(),
            kind,
        });
        Ok(())
    }

    /// Start dragging one footprint corner of a vertical link on the
    /// current floor
    pub fn begin_link_corner_drag(&mut self, link_id: &ElementId, corner_index: usize) -> EditorResult<()> {
        let floor = self.current_floor();
        let link = floor
            .vertical_link(link_id)
            .cloned()
            .ok_or_else(|| museumkit_core::ModelError::ElementNotFound {
                element_type: ElementType::VerticalLink,
                id: link_id.to_string(),
            })?;
        if corner_index > 3 {
            return Err(EditorError::Unsupported {
                element_type: ElementType::VerticalLink,
                reason: format!("corner index {} out of range", corner_index),
            });
        }
        let floor_id = floor.id.clone();
        self.start(GestureKind::LinkCorner {
            floor_id,
            link_id: link_id.clone(),
            corner_index,
            original: link,
        })
    }

    /// Move the dragged corner toward `pointer`.
    ///
    /// The pointer is snapped first. The resize is measured against the
    /// link as it was when the drag began; when accepted it is applied live
    /// to the link and every copy of it on other floors. The verdict is
    /// returned either way so the host can show feedback.
    pub fn update_link_corner_drag(&mut self, pointer: Point) -> EditorResult<ValidationResult> {
        let Some(Gesture {
            kind:
                GestureKind::LinkCorner {
                    floor_id,
                    link_id,
                    corner_index,
                    original,
                },
            ..
        }) = self.gesture.clone()
        else {
            return Err(EditorError::NoActiveGesture);
        };

        let floor = self
            .floor(&floor_id)
            .ok_or_else(|| museumkit_core::ModelError::FloorNotFound {
                floor_id: floor_id.to_string(),
            })?;
        let options = SnapOptions::from_config(&self.config).excluding(link_id.clone());
        let target = snap_point(pointer, floor, &options).map_or(pointer, |c| c.point);

        // Other copies of the dragged link move together, so they never collide
        let group: Vec<ElementId> = self
            .floors()
            .iter()
            .flat_map(|f| f.vertical_links.iter())
            .filter(|l| l.is_linked_with(&original))
            .map(|l| l.id.clone())
            .collect();
        let ctx = crate::validation::ValidationContext::new(floor, &self.config)
            .with_floors(self.floors())
            .excluding(&group);
        let result = validate_vertical_link_corner_placement(&original, corner_index, target, &ctx);
        if !result.valid {
            return Ok(result);
        }

        let Some(moved) = crate::validation::move_link_corner(&original, corner_index, target) else {
            return Ok(result);
        };
        let mut floors = self.floors().to_vec();
        for link in floors
            .iter_mut()
            .flat_map(|f| f.vertical_links.iter_mut())
            .filter(|l| l.is_linked_with(&original))
        {
            link.segment = moved.segment;
            link.width = moved.width;
        }
        self.update_state(super::StateUpdate::new().floors(floors), false)?;
        Ok(result)
    }

    /// Finish a corner drag, recording it as one history entry
    pub fn end_link_corner_drag(&mut self) -> EditorResult<bool> {
        match &self.gesture {
            Some(Gesture {
                kind: GestureKind::LinkCorner { .. },
                ..
            }) => self.end_gesture("Resize vertical link"),
            _ => Err(EditorError::NoActiveGesture),
        }
    }

    /// Abandon a corner drag, putting the link back where it was
    pub fn cancel_link_corner_drag(&mut self) -> EditorResult<()> {
        match &self.gesture {
            Some(Gesture {
                kind: GestureKind::LinkCorner { .. },
                ..
            }) => self.cancel_gesture(),
            _ => Err(EditorError::NoActiveGesture),
        }
    }
}
