use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Bounds, ElementId, Point};

/// A room outline
///
/// The polygon is closed implicitly: the last vertex connects back to the
/// first. Insertion order defines the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: ElementId,
    pub name: String,
    pub polygon: Vec<Point>,
}

impl Room {
    pub fn new(name: impl Into<String>, polygon: Vec<Point>) -> Self {
        Self {
            id: ElementId::generate(),
            name: name.into(),
            polygon,
        }
    }

    /// Axis-aligned rectangle room spanning `min` to `max`
    pub fn rectangle(name: impl Into<String>, min: Point, max: Point) -> Self {
        Self::new(
            name,
            vec![
                min,
                Point::new(max.x, min.y),
                max,
                Point::new(min.x, max.y),
            ],
        )
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Iterate over the closed boundary edges
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.polygon.len();
        (0..n).map(move |i| (self.polygon[i], self.polygon[(i + 1) % n]))
    }
}

/// A wall segment or polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: ElementId,
    pub segment: [Point; 2],
    /// Optional multi-point path; when present it supersedes `segment`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Point>>,
    /// Thickness in meters
    pub thickness: f64,
    #[serde(default)]
    pub is_load_bearing: bool,
    /// Weak reference to the room this wall partitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<ElementId>,
}

impl Wall {
    pub fn new(start: Point, end: Point, thickness: f64) -> Self {
        Self {
            id: ElementId::generate(),
            segment: [start, end],
            path: None,
            thickness,
            is_load_bearing: false,
            room_id: None,
        }
    }

    pub fn with_path(mut self, path: Vec<Point>) -> Self {
        if let (Some(first), Some(last)) = (path.first(), path.last()) {
            self.segment = [*first, *last];
        }
        self.path = Some(path);
        self
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_room(mut self, room_id: impl Into<ElementId>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn load_bearing(mut self) -> Self {
        self.is_load_bearing = true;
        self
    }

    /// The points that make up the wall
    pub fn points(&self) -> &[Point] {
        match &self.path {
            Some(path) if path.len() >= 2 => path,
            _ => &self.segment,
        }
    }

    /// Consecutive segments along the wall
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points().windows(2).map(|w| (w[0], w[1]))
    }
}

/// A door between two rooms, or between a room and the exterior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: ElementId,
    pub segment: [Point; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_a: Option<ElementId>,
    /// `None` means the door opens to the exterior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_b: Option<ElementId>,
    /// Supporting wall, resolved during validation when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_id: Option<ElementId>,
}

impl Door {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: ElementId::generate(),
            segment: [start, end],
            room_a: None,
            room_b: None,
            wall_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn between(mut self, room_a: impl Into<ElementId>, room_b: Option<ElementId>) -> Self {
        self.room_a = Some(room_a.into());
        self.room_b = room_b;
        self
    }

    pub fn on_wall(mut self, wall_id: impl Into<ElementId>) -> Self {
        self.wall_id = Some(wall_id.into());
        self
    }

    /// Room ids this door references
    pub fn room_ids(&self) -> impl Iterator<Item = &ElementId> {
        self.room_a.iter().chain(self.room_b.iter())
    }

    pub fn references_room(&self, room_id: &ElementId) -> bool {
        self.room_ids().any(|id| id == room_id)
    }
}

/// An artwork footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: ElementId,
    #[serde(default)]
    pub name: String,
    /// Top-left corner
    pub position: Point,
    /// Width and height in grid units
    pub size: [f64; 2],
    /// Linked document id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_link: Option<String>,
    /// Artworks sharing a zone may overlap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

impl Artwork {
    pub fn new(name: impl Into<String>, position: Point, size: [f64; 2]) -> Self {
        Self {
            id: ElementId::generate(),
            name: name.into(),
            position,
            size,
            pdf_link: None,
            zone_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn in_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.position.x,
            min_y: self.position.y,
            max_x: self.position.x + self.size[0],
            max_y: self.position.y + self.size[1],
        }
    }

    /// Rectangle corners in boundary order
    pub fn corners(&self) -> [Point; 4] {
        let b = self.bounds();
        [
            Point::new(b.min_x, b.min_y),
            Point::new(b.max_x, b.min_y),
            Point::new(b.max_x, b.max_y),
            Point::new(b.min_x, b.max_y),
        ]
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// Stairs or elevator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    #[default]
    Stairs,
    Elevator,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stairs => write!(f, "stairs"),
            Self::Elevator => write!(f, "elevator"),
        }
    }
}

/// Direction of travel from the owning floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    Up,
    Down,
    #[default]
    Both,
}

impl LinkDirection {
    /// Direction seen from the connected floor
    pub fn inverted(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Both => Self::Both,
        }
    }
}

/// A vertical connection between two floors
///
/// The footprint is the rectangle built on `segment` and extended by
/// `width` along the segment's left normal. Corners are numbered
/// `segment[0]`, `segment[1]`, then the two offset corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalLink {
    pub id: ElementId,
    #[serde(default)]
    pub kind: LinkKind,
    pub segment: [Point; 2],
    /// Depth of the footprint in grid units
    pub width: f64,
    #[serde(default)]
    pub direction: LinkDirection,
    /// Floor reached by this link; `None` once orphaned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_floor_id: Option<ElementId>,
    /// Shared by every copy of the same link across floors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_link_id: Option<ElementId>,
}

impl VerticalLink {
    pub fn new(kind: LinkKind, start: Point, end: Point, width: f64) -> Self {
        Self {
            id: ElementId::generate(),
            kind,
            segment: [start, end],
            width,
            direction: LinkDirection::Both,
            to_floor_id: None,
            master_link_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn to_floor(mut self, floor_id: impl Into<ElementId>) -> Self {
        self.to_floor_id = Some(floor_id.into());
        self
    }

    pub fn with_master(mut self, master_id: impl Into<ElementId>) -> Self {
        self.master_link_id = Some(master_id.into());
        self
    }

    /// Identifier shared by the linked copies of this link
    pub fn group_id(&self) -> &ElementId {
        self.master_link_id.as_ref().unwrap_or(&self.id)
    }

    pub fn is_linked_with(&self, other: &VerticalLink) -> bool {
        self.group_id() == other.group_id()
    }

    /// Left normal of the base segment, unit length
    pub fn normal(&self) -> Point {
        let [a, b] = self.segment;
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return Point::new(0.0, 1.0);
        }
        Point::new(-dy / len, dx / len)
    }

    /// Footprint corners in boundary order
    pub fn corners(&self) -> [Point; 4] {
        let [a, b] = self.segment;
        let n = self.normal();
        let (ox, oy) = (n.x * self.width, n.y * self.width);
        [a, b, b.translated(ox, oy), a.translated(ox, oy)]
    }

    pub fn center(&self) -> Point {
        let c = self.corners();
        Point::new(
            (c[0].x + c[1].x + c[2].x + c[3].x) / 4.0,
            (c[0].y + c[1].y + c[2].y + c[3].y) / 4.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_points_prefer_path() {
        let wall = Wall::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0), 0.2);
        assert_eq!(wall.points().len(), 2);

        let wall = wall.with_path(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
        ]);
        assert_eq!(wall.points().len(), 3);
        assert_eq!(wall.segment[1], Point::new(2.0, 2.0));
        assert_eq!(wall.segments().count(), 2);
    }

    #[test]
    fn test_link_corners_follow_left_normal() {
        let link = VerticalLink::new(
            LinkKind::Stairs,
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            1.0,
        );
        let corners = link.corners();
        assert_eq!(corners[2], Point::new(2.0, 1.0));
        assert_eq!(corners[3], Point::new(0.0, 1.0));
        assert_eq!(link.center(), Point::new(1.0, 0.5));
    }

    #[test]
    fn test_link_group_id() {
        let master = VerticalLink::new(LinkKind::Elevator, Point::new(0.0, 0.0), Point::new(1.0, 0.0), 1.0)
            .with_id("m");
        let copy = master.clone().with_id("c").with_master("m");
        assert_eq!(master.group_id().as_str(), "m");
        assert!(copy.is_linked_with(&master));
        assert_eq!(LinkDirection::Up.inverted(), LinkDirection::Down);
    }

    #[test]
    fn test_door_room_refs() {
        let door = Door::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).between("a", Some("b".into()));
        assert!(door.references_room(&"b".into()));
        assert_eq!(door.room_ids().count(), 2);
    }
}
