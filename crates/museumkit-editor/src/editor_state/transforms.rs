//! Room translation and vertex editing

use std::collections::HashSet;

use museumkit_core::{ElementId, ElementType, ModelError, Point, Room};

use super::{EditorState, StateUpdate};
use crate::cascade::relations::{room_artworks, room_links, room_walls, wall_doors};
use crate::error::EditorResult;
use crate::validation::{
    validate_artwork_placement, validate_point_addition, validate_point_removal, validate_room_placement,
    validate_vertical_link_translation, validate_wall_placement, ValidationContext, ValidationResult,
};

fn room_not_found(id: &ElementId) -> ModelError {
    ModelError::ElementNotFound {
        element_type: ElementType::Room,
        id: id.to_string(),
    }
}

impl EditorState {
    fn room_on_current(&self, room_id: &ElementId) -> EditorResult<&Room> {
        Ok(self
            .current_floor()
            .room(room_id)
            .ok_or_else(|| room_not_found(room_id))?)
    }

    /// Validate a reshaped room against its neighbours, ignoring itself
    fn check_reshaped(&self, room: &Room) -> EditorResult<ValidationResult> {
        let excluded = [room.id.clone()];
        let ctx = self
            .validation_context()
            .excluding(&excluded)
            .strict(self.strict_mode);
        let result = validate_room_placement(room, &ctx);
        self.ensure_accepted(result, self.strict_mode)
    }

    /// Re-check the walls and artworks of a room against its new outline
    fn check_room_contents(&self, edited: &Room) -> EditorResult<()> {
        let constraints = &self.config.constraints;
        let floor = self.current_floor();
        let original = self.room_on_current(&edited.id)?;

        let mut reshaped = floor.clone();
        if let Some(r) = reshaped.rooms.iter_mut().find(|r| r.id == edited.id) {
            *r = edited.clone();
        }
        let ctx = ValidationContext::new(&reshaped, &self.config).strict(self.strict_mode);
        for wall in room_walls(floor, original, constraints) {
            self.ensure_accepted(validate_wall_placement(wall, &ctx), self.strict_mode)?;
        }
        for artwork in room_artworks(floor, original, constraints) {
            self.ensure_accepted(validate_artwork_placement(artwork, &ctx), self.strict_mode)?;
        }
        Ok(())
    }

    /// Move a room by `(dx, dy)` together with its walls, the doors on those
    /// walls, its artworks and its vertical links.
    ///
    /// Copies of the moved links on other floors follow so linked
    /// footprints stay aligned.
    pub fn translate_room(&mut self, room_id: &ElementId, dx: f64, dy: f64) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let constraints = &self.config.constraints;
        let floor = self.current_floor();
        let room = self.room_on_current(room_id)?;

        let walls: HashSet<ElementId> = room_walls(floor, room, constraints)
            .into_iter()
            .map(|w| w.id.clone())
            .collect();
        let doors: HashSet<ElementId> = floor
            .walls
            .iter()
            .filter(|w| walls.contains(&w.id))
            .flat_map(|w| wall_doors(floor, w, constraints))
            .map(|d| d.id.clone())
            .collect();
        let artworks: HashSet<ElementId> = room_artworks(floor, room, constraints)
            .into_iter()
            .map(|a| a.id.clone())
            .collect();
        let groups: HashSet<ElementId> = room_links(floor, room, constraints)
            .into_iter()
            .map(|l| l.group_id().clone())
            .collect();

        let mut moved = room.clone();
        for p in &mut moved.polygon {
            *p = p.translated(dx, dy);
        }
        let result = self.check_reshaped(&moved)?;

        let index = self.current_floor_index();
        let mut floors = self.floors().to_vec();
        let current = &mut floors[index];
        if let Some(r) = current.rooms.iter_mut().find(|r| &r.id == room_id) {
            *r = moved;
        }
        for wall in current.walls.iter_mut().filter(|w| walls.contains(&w.id)) {
            wall.segment = wall.segment.map(|p| p.translated(dx, dy));
            if let Some(path) = &mut wall.path {
                for p in path.iter_mut() {
                    *p = p.translated(dx, dy);
                }
            }
        }
        for door in current.doors.iter_mut().filter(|d| doors.contains(&d.id)) {
            door.segment = door.segment.map(|p| p.translated(dx, dy));
        }
        for art in current.artworks.iter_mut().filter(|a| artworks.contains(&a.id)) {
            art.position = art.position.translated(dx, dy);
        }
        for link in floors
            .iter_mut()
            .flat_map(|f| f.vertical_links.iter_mut())
            .filter(|l| groups.contains(l.group_id()))
        {
            link.segment = link.segment.map(|p| p.translated(dx, dy));
        }

        // moved links must not land on rooms or links of the floors they reach
        let moved_links: Vec<_> = floors[index]
            .vertical_links
            .iter()
            .filter(|l| groups.contains(l.group_id()))
            .cloned()
            .collect();
        let ctx = ValidationContext::new(&floors[index], &self.config).with_floors(&floors);
        for moved in &moved_links {
            let Some(original) = self.current_floor().vertical_link(&moved.id) else {
                continue;
            };
            let check = validate_vertical_link_translation(original, moved, self.floors(), &ctx);
            self.ensure_accepted(check, self.strict_mode)?;
        }

        let name = self.room_on_current(room_id)?.name.clone();
        self.update_state(StateUpdate::new().floors(floors).describe(format!("Move room {}", name)), true)?;
        Ok(result)
    }

    /// Insert a vertex into a room outline before position `index`
    pub fn insert_room_vertex(&mut self, room_id: &ElementId, index: usize, point: Point) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let room = self.room_on_current(room_id)?;
        let check = validate_point_addition(&room.polygon, point, index, &self.config.constraints);
        self.ensure_accepted(check, self.strict_mode)?;

        let mut edited = room.clone();
        edited.polygon.insert(index, point);
        let result = self.check_reshaped(&edited)?;
        self.check_room_contents(&edited)?;
        self.replace_room(edited, "Add room vertex")?;
        Ok(result)
    }

    /// Remove vertex `index` from a room outline
    pub fn remove_room_vertex(&mut self, room_id: &ElementId, index: usize) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let room = self.room_on_current(room_id)?;
        let check = validate_point_removal(&room.polygon, index);
        self.ensure_accepted(check, self.strict_mode)?;

        let mut edited = room.clone();
        edited.polygon.remove(index);
        let result = self.check_reshaped(&edited)?;
        self.check_room_contents(&edited)?;
        self.replace_room(edited, "Remove room vertex")?;
        Ok(result)
    }

    /// Move vertex `index` of a room outline to `point`
    pub fn move_room_vertex(&mut self, room_id: &ElementId, index: usize, point: Point) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let mut edited = self.room_on_current(room_id)?.clone();
        let Some(vertex) = edited.polygon.get_mut(index) else {
            return Err(crate::error::EditorError::Unsupported {
                element_type: ElementType::Room,
                reason: format!("vertex {} does not exist", index),
            });
        };
        *vertex = point;
        let result = self.check_reshaped(&edited)?;
        self.check_room_contents(&edited)?;
        self.replace_room(edited, "Move room vertex")?;
        Ok(result)
    }

    fn replace_room(&mut self, room: Room, description: &str) -> EditorResult<()> {
        let index = self.current_floor_index();
        let mut floors = self.floors().to_vec();
        if let Some(r) = floors[index].rooms.iter_mut().find(|r| r.id == room.id) {
            *r = room;
        }
        self.update_state(StateUpdate::new().floors(floors).describe(description), true)
    }
}
