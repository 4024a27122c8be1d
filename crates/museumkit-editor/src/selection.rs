//! Selection state for the editor
//!
//! Selection is plain data captured in every history snapshot. It keeps an
//! ordered list of selected elements; the last one is the primary selection.

use museumkit_core::{ElementId, ElementType, Floor, Point};
use serde::{Deserialize, Serialize};

use crate::geometry::{distance_to_segment, is_point_inside_or_on};

/// One selected element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedElement {
    pub id: ElementId,
    pub element_type: ElementType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    items: Vec<SelectedElement>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Most recently selected element
    pub fn primary(&self) -> Option<&SelectedElement> {
        self.items.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedElement> {
        self.items.iter()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Replace the selection with a single element
    pub fn select(&mut self, id: ElementId, element_type: ElementType) {
        self.items.clear();
        self.items.push(SelectedElement { id, element_type });
    }

    /// Shift-click behaviour: add when absent, remove when present
    pub fn toggle(&mut self, id: ElementId, element_type: ElementType) {
        if let Some(pos) = self.items.iter().position(|item| item.id == id) {
            self.items.remove(pos);
        } else {
            self.items.push(SelectedElement { id, element_type });
        }
    }

    pub fn deselect(&mut self, id: &ElementId) {
        self.items.retain(|item| &item.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Select every element on `floor`
    pub fn select_all(&mut self, floor: &Floor) {
        self.items = floor
            .element_ids()
            .map(|(id, element_type)| SelectedElement {
                id: id.clone(),
                element_type,
            })
            .collect();
    }

    /// Drop entries whose element no longer exists on `floor`
    pub fn retain_existing(&mut self, floor: &Floor) {
        self.items
            .retain(|item| floor.contains(&item.id, item.element_type));
    }
}

/// Topmost element under `point`
///
/// Small elements win over the walls they sit on, and walls win over the
/// rooms they partition.
pub fn element_at(floor: &Floor, point: Point, tolerance: f64) -> Option<SelectedElement> {
    let hit = |id: &ElementId, element_type| SelectedElement {
        id: id.clone(),
        element_type,
    };

    if let Some(door) = floor
        .doors
        .iter()
        .rev()
        .find(|d| distance_to_segment(point, d.segment[0], d.segment[1]) <= tolerance)
    {
        return Some(hit(&door.id, ElementType::Door));
    }
    if let Some(art) = floor.artworks.iter().rev().find(|a| a.bounds().contains(&point)) {
        return Some(hit(&art.id, ElementType::Artwork));
    }
    if let Some(link) = floor
        .vertical_links
        .iter()
        .rev()
        .find(|l| is_point_inside_or_on(point, &l.corners(), tolerance))
    {
        return Some(hit(&link.id, ElementType::VerticalLink));
    }
    if let Some(wall) = floor
        .walls
        .iter()
        .rev()
        .find(|w| w.segments().any(|(a, b)| distance_to_segment(point, a, b) <= tolerance))
    {
        return Some(hit(&wall.id, ElementType::Wall));
    }
    floor
        .rooms
        .iter()
        .rev()
        .find(|r| is_point_inside_or_on(point, &r.polygon, tolerance))
        .map(|room| hit(&room.id, ElementType::Room))
}
