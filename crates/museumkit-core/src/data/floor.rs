use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Artwork, Door, ElementId, ElementType, Room, VerticalLink, Wall};
use crate::error::{InvariantViolation, ModelError};

/// One level of the building
///
/// A floor owns every element placed on it. Removing the floor removes
/// all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: ElementId,
    pub name: String,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub artworks: Vec<Artwork>,
    #[serde(default)]
    pub vertical_links: Vec<VerticalLink>,
}

impl Floor {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            id: ElementId::generate(),
            name: name.into(),
            level,
            rooms: Vec::new(),
            walls: Vec::new(),
            doors: Vec::new(),
            artworks: Vec::new(),
            vertical_links: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn room(&self, id: &ElementId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    pub fn wall(&self, id: &ElementId) -> Option<&Wall> {
        self.walls.iter().find(|w| &w.id == id)
    }

    pub fn door(&self, id: &ElementId) -> Option<&Door> {
        self.doors.iter().find(|d| &d.id == id)
    }

    pub fn artwork(&self, id: &ElementId) -> Option<&Artwork> {
        self.artworks.iter().find(|a| &a.id == id)
    }

    pub fn vertical_link(&self, id: &ElementId) -> Option<&VerticalLink> {
        self.vertical_links.iter().find(|l| &l.id == id)
    }

    /// Iterate over every element id on this floor with its kind
    pub fn element_ids(&self) -> impl Iterator<Item = (&ElementId, ElementType)> {
        self.rooms
            .iter()
            .map(|r| (&r.id, ElementType::Room))
            .chain(self.walls.iter().map(|w| (&w.id, ElementType::Wall)))
            .chain(self.doors.iter().map(|d| (&d.id, ElementType::Door)))
            .chain(self.artworks.iter().map(|a| (&a.id, ElementType::Artwork)))
            .chain(
                self.vertical_links
                    .iter()
                    .map(|l| (&l.id, ElementType::VerticalLink)),
            )
    }

    /// Build the id table used to resolve weak references
    pub fn element_index(&self) -> HashMap<&ElementId, ElementType> {
        self.element_ids().collect()
    }

    /// Kind of the element with `id`, if it lives on this floor
    pub fn element_type_of(&self, id: &ElementId) -> Option<ElementType> {
        self.element_ids()
            .find(|(element_id, _)| *element_id == id)
            .map(|(_, kind)| kind)
    }

    pub fn contains(&self, id: &ElementId, element_type: ElementType) -> bool {
        match element_type {
            ElementType::Floor => &self.id == id,
            ElementType::Room => self.room(id).is_some(),
            ElementType::Wall => self.wall(id).is_some(),
            ElementType::Door => self.door(id).is_some(),
            ElementType::Artwork => self.artwork(id).is_some(),
            ElementType::VerticalLink => self.vertical_link(id).is_some(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.rooms.len()
            + self.walls.len()
            + self.doors.len()
            + self.artworks.len()
            + self.vertical_links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Fail with [`ModelError::DuplicateId`] when `id` is already taken
    pub fn ensure_unique(&self, id: &ElementId, element_type: ElementType) -> Result<(), ModelError> {
        if self.element_type_of(id).is_some() {
            return Err(ModelError::DuplicateId {
                element_type,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Check ids are unique and every weak reference resolves
    pub fn check_integrity(&self) -> Result<(), InvariantViolation> {
        let mut index = HashMap::new();
        for (id, kind) in self.element_ids() {
            if index.insert(id, kind).is_some() {
                return Err(InvariantViolation::DuplicateId { id: id.to_string() });
            }
        }

        let dangling = |owner: &ElementId, element_type: ElementType, target: &ElementId| {
            InvariantViolation::DanglingReference {
                floor_id: self.id.to_string(),
                owner: owner.to_string(),
                element_type,
                id: target.to_string(),
            }
        };

        for wall in &self.walls {
            if let Some(room_id) = &wall.room_id {
                if index.get(room_id) != Some(&ElementType::Room) {
                    return Err(dangling(&wall.id, ElementType::Room, room_id));
                }
            }
        }

        for door in &self.doors {
            for room_id in door.room_ids() {
                if index.get(room_id) != Some(&ElementType::Room) {
                    return Err(dangling(&door.id, ElementType::Room, room_id));
                }
            }
            if let Some(wall_id) = &door.wall_id {
                if index.get(wall_id) != Some(&ElementType::Wall) {
                    return Err(dangling(&door.id, ElementType::Wall, wall_id));
                }
            }
        }

        Ok(())
    }
}
