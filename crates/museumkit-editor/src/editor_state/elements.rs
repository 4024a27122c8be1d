//! Adding elements and floors

use museumkit_core::{Artwork, Door, ElementId, ElementType, Floor, Room, VerticalLink, Wall};

use super::{EditorState, StateUpdate};
use crate::error::EditorResult;
use crate::naming;
use crate::geometry::{is_point_on_polygon_boundary, segment_midpoint};
use crate::validation::{
    find_host_room, validate_artwork_placement, validate_door_placement, validate_room_placement,
    validate_vertical_link_placement, validate_wall_placement, ValidationResult,
};

impl EditorState {
    /// Element ids are unique across every floor
    fn ensure_unique(&self, id: &ElementId, element_type: ElementType) -> EditorResult<()> {
        for floor in self.floors() {
            floor.ensure_unique(id, element_type)?;
        }
        Ok(())
    }

    /// Push a validated element onto the current floor and commit
    fn commit_on_current<F>(&mut self, id: &ElementId, element_type: ElementType, description: String, push: F) -> EditorResult<()>
    where
        F: FnOnce(&mut Floor),
    {
        self.ensure_unique(id, element_type)?;
        let index = self.current_floor_index();
        let mut floors = self.floors().to_vec();
        push(&mut floors[index]);
        self.update_state(StateUpdate::new().floors(floors).describe(description), true)
    }

    pub fn add_room(&mut self, room: Room) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let strict = self.strict_mode;
        let result = validate_room_placement(&room, &self.validation_context().strict(strict));
        let result = self.ensure_accepted(result, strict)?;
        let id = room.id.clone();
        self.commit_on_current(&id, ElementType::Room, format!("Add room {}", room.name), |f| {
            f.rooms.push(room)
        })?;
        Ok(result)
    }

    /// Add a wall; an unassigned interior wall is attached to its host room
    pub fn add_wall(&mut self, mut wall: Wall) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let strict = self.strict_mode;
        let result = validate_wall_placement(&wall, &self.validation_context().strict(strict));
        let result = self.ensure_accepted(result, strict)?;
        if wall.room_id.is_none() {
            let tolerance = self.config.constraints.attachment_tolerance;
            wall.room_id = find_host_room(wall.points(), self.current_floor(), tolerance).map(|r| r.id.clone());
        }
        let id = wall.id.clone();
        self.commit_on_current(&id, ElementType::Wall, "Add wall".into(), |f| f.walls.push(wall))?;
        Ok(result)
    }

    /// Add a door; the supporting wall and the rooms it connects are filled
    /// in when absent
    pub fn add_door(&mut self, mut door: Door) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let strict = self.strict_mode;
        let result = validate_door_placement(&door, &self.validation_context().strict(strict));
        let result = self.ensure_accepted(result, strict)?;

        if door.wall_id.is_none() {
            door.wall_id = result.affected_elements.first().cloned();
        }
        if door.room_a.is_none() {
            let tolerance = self.config.constraints.door_snap_tolerance;
            let middle = segment_midpoint(door.segment[0], door.segment[1]);
            let mut rooms = self
                .current_floor()
                .rooms
                .iter()
                .filter(|r| is_point_on_polygon_boundary(middle, &r.polygon, tolerance))
                .map(|r| r.id.clone());
            door.room_a = rooms.next();
            door.room_b = rooms.next();
        }

        let id = door.id.clone();
        self.commit_on_current(&id, ElementType::Door, "Add door".into(), |f| f.doors.push(door))?;
        Ok(result)
    }

    pub fn add_artwork(&mut self, artwork: Artwork) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let strict = self.strict_mode;
        let result = validate_artwork_placement(&artwork, &self.validation_context().strict(strict));
        let result = self.ensure_accepted(result, strict)?;
        let id = artwork.id.clone();
        self.commit_on_current(&id, ElementType::Artwork, format!("Add artwork {}", artwork.name), |f| {
            f.artworks.push(artwork)
        })?;
        Ok(result)
    }

    /// Add a vertical link on the current floor together with its copy on
    /// the target floor.
    ///
    /// The copy shares the footprint, points back at the current floor and
    /// travels in the inverted direction.
    pub fn add_vertical_link(&mut self, link: VerticalLink) -> EditorResult<ValidationResult> {
        self.ensure_idle()?;
        let strict = self.strict_mode;
        let result = validate_vertical_link_placement(&link, &self.validation_context().strict(strict));
        let result = self.ensure_accepted(result, strict)?;

        let current = self.current_floor().id.clone();
        self.ensure_unique(&link.id, ElementType::VerticalLink)?;
        let mut floors = self.floors().to_vec();
        if let Some(target_id) = &link.to_floor_id {
            if let Some(target) = floors.iter_mut().find(|f| &f.id == target_id) {
                let mut copy = link.clone();
                copy.id = ElementId::generate();
                copy.master_link_id = Some(link.group_id().clone());
                copy.to_floor_id = Some(current.clone());
                copy.direction = link.direction.inverted();
                target.vertical_links.push(copy);
            }
        }
        let index = self.current_floor_index();
        let description = format!("Add {}", link.kind);
        floors[index].vertical_links.push(link);
        self.update_state(StateUpdate::new().floors(floors).describe(description), true)?;
        Ok(result)
    }

    /// Add an empty floor one level above the highest and switch to it
    pub fn add_floor(&mut self, name: impl Into<String>) -> EditorResult<ElementId> {
        self.ensure_idle()?;
        let level = self.floors().iter().map(|f| f.level).max().map_or(0, |l| l + 1);
        let floor = Floor::new(name, level);
        let id = floor.id.clone();
        let description = format!("Add floor {}", floor.name);
        let mut floors = self.floors().to_vec();
        floors.push(floor);
        self.update_state(
            StateUpdate::new()
                .floors(floors)
                .current_floor(id.clone())
                .selection(Default::default())
                .describe(description),
            true,
        )?;
        Ok(id)
    }

    /// Add a floor above the highest, named after its level
    pub fn add_named_floor(&mut self) -> EditorResult<ElementId> {
        let level = self.floors().iter().map(|f| f.level).max().map_or(0, |l| l + 1);
        self.add_floor(naming::floor_name(level))
    }

    /// Rename every floor after its level, as one undoable step
    pub fn rename_all_floors(&mut self) -> EditorResult<()> {
        self.ensure_idle()?;
        let floors = naming::rename_floors(self.floors());
        if floors.iter().zip(self.floors()).all(|(a, b)| a.name == b.name) {
            return Ok(());
        }
        self.update_state(StateUpdate::new().floors(floors).describe("Rename floors"), true)
    }
}
