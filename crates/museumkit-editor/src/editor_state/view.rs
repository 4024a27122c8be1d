//! Selection, tool, viewport and room drawing

use museumkit_core::{ElementId, ModelError, Point, Room};

use super::{EditorState, StateUpdate, Tool};
use crate::error::EditorResult;
use crate::geometry::{bounds, distance, segments_intersect};
use crate::naming;
use crate::selection::{element_at, SelectedElement, Selection};
use crate::snap::{snap_point, SnapOptions};
use crate::validation::{ValidationCode, ValidationResult};
use crate::viewport::Viewport;

/// Fraction of the canvas kept free on each side by `fit_to_floor`
const FIT_PADDING: f64 = 0.05;

impl EditorState {
    // Selection

    fn set_selection(&mut self, selection: Selection) -> EditorResult<()> {
        self.update_state(StateUpdate::new().selection(selection), false)
    }

    /// Select a single element of the current floor; `false` when it does
    /// not exist there
    pub fn select(&mut self, id: &ElementId) -> bool {
        let Some(element_type) = self.current_floor().element_type_of(id) else {
            return false;
        };
        let mut selection = Selection::new();
        selection.select(id.clone(), element_type);
        self.set_selection(selection).is_ok()
    }

    /// Add or remove an element from a multi-selection
    pub fn toggle_selection(&mut self, id: &ElementId) -> bool {
        let Some(element_type) = self.current_floor().element_type_of(id) else {
            return false;
        };
        let mut selection = self.selection().clone();
        selection.toggle(id.clone(), element_type);
        self.set_selection(selection).is_ok()
    }

    /// Select the topmost element under `point`, or clear the selection
    /// when nothing is hit
    pub fn select_at(&mut self, point: Point, additive: bool) -> Option<SelectedElement> {
        let tolerance = self.config.grid.vertex_snap_threshold;
        let hit = element_at(self.current_floor(), point, tolerance);
        let mut selection = if additive {
            self.selection().clone()
        } else {
            Selection::new()
        };
        if let Some(hit) = &hit {
            if additive {
                selection.toggle(hit.id.clone(), hit.element_type);
            } else {
                selection.select(hit.id.clone(), hit.element_type);
            }
        }
        if self.set_selection(selection).is_err() {
            return None;
        }
        hit
    }

    pub fn select_all(&mut self) -> EditorResult<()> {
        let mut selection = Selection::new();
        selection.select_all(self.current_floor());
        self.set_selection(selection)
    }

    pub fn clear_selection(&mut self) -> EditorResult<()> {
        self.set_selection(Selection::new())
    }

    /// Switch the floor being edited; the selection is cleared
    pub fn set_current_floor(&mut self, floor_id: &ElementId) -> EditorResult<()> {
        if self.floor(floor_id).is_none() {
            return Err(ModelError::FloorNotFound {
                floor_id: floor_id.to_string(),
            }
            .into());
        }
        self.current_polygon.clear();
        self.update_state(
            StateUpdate::new()
                .current_floor(floor_id.clone())
                .selection(Selection::new()),
            false,
        )
    }

    // Tool

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Change tool; an unfinished room outline is dropped
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            tracing::debug!(?tool, "tool changed");
            self.current_polygon.clear();
        }
        self.tool = tool;
    }

    // Viewport

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn screen_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        self.viewport.pixel_to_world(pixel_x, pixel_y)
    }

    pub fn world_to_screen(&self, point: Point) -> (f64, f64) {
        self.viewport.world_to_pixel(point)
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Wheel zoom around the pointer
    pub fn zoom_at(&mut self, pixel_x: f64, pixel_y: f64, zoom_in: bool) {
        let anchor = self.viewport.pixel_to_world(pixel_x, pixel_y);
        if zoom_in {
            self.viewport.zoom_in_at(anchor);
        } else {
            self.viewport.zoom_out_at(anchor);
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    /// Zoom and pan so every element of the current floor is visible
    pub fn fit_to_floor(&mut self) {
        let floor = self.current_floor();
        let mut points: Vec<Point> = floor.rooms.iter().flat_map(|r| r.polygon.iter().copied()).collect();
        points.extend(floor.walls.iter().flat_map(|w| w.points().iter().copied()));
        points.extend(floor.artworks.iter().flat_map(|a| a.corners()));
        points.extend(floor.vertical_links.iter().flat_map(|l| l.corners()));
        if points.is_empty() {
            self.viewport.reset();
            return;
        }
        let extent = bounds(&points);
        self.viewport.fit_to_bounds(&extent, FIT_PADDING);
    }

    // Room drawing

    /// Outline of the room being drawn
    pub fn current_polygon(&self) -> &[Point] {
        &self.current_polygon
    }

    /// Append a snapped vertex to the room being drawn.
    ///
    /// The point is kept only when the verdict is valid; either way the
    /// verdict is returned for feedback.
    pub fn add_polygon_point(&mut self, point: Point) -> ValidationResult {
        let options = SnapOptions::from_config(&self.config);
        let snapped = snap_point(point, self.current_floor(), &options).map_or(point, |c| c.point);

        let path = &self.current_polygon;
        let tolerance = self.config.constraints.duplicate_point_tolerance;
        let crosses = |last: Point| {
            path.windows(2)
                .take(path.len().saturating_sub(2))
                .any(|w| segments_intersect(w[0], w[1], last, snapped))
        };
        let result = if let Some(existing) = path.iter().position(|p| distance(*p, snapped) < tolerance) {
            ValidationResult::error(
                ValidationCode::RoomDuplicatePoints,
                format!("New vertex coincides with vertex {}", existing),
            )
        } else if path.last().is_some_and(|&last| crosses(last)) {
            ValidationResult::error(
                ValidationCode::RoomSelfIntersecting,
                "The new edge would cross the outline",
            )
        } else {
            ValidationResult::ok(ValidationCode::RoomValid, "Vertex can be added")
        };

        if result.valid {
            self.current_polygon.push(snapped);
        }
        result
    }

    /// Turn the drawn outline into a room
    ///
    /// On rejection the outline is kept so the user can fix it. A blank
    /// name falls back to the next free "Room X" letter of the floor.
    pub fn close_polygon(&mut self, name: impl Into<String>) -> EditorResult<ValidationResult> {
        let mut name = name.into();
        if name.trim().is_empty() {
            name = naming::next_room_name(self.current_floor());
        }
        let room = Room::new(name, self.current_polygon.clone());
        let result = self.add_room(room)?;
        self.current_polygon.clear();
        Ok(result)
    }

    /// Drop the outline being drawn
    pub fn cancel_polygon(&mut self) {
        self.current_polygon.clear();
    }
}
