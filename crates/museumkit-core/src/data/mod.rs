//! Floor plan data model
//!
//! Floors own their rooms, walls, doors, artworks and vertical links by
//! value. Every cross reference between elements is an [`ElementId`]
//! resolved through the owning floor, never a pointer.

mod document;
mod elements;
mod floor;
mod ids;

pub use document::{check_floors, PlanDocument};
pub use elements::{Artwork, Door, LinkDirection, LinkKind, Room, VerticalLink, Wall};
pub use floor::Floor;
pub use ids::{ElementId, ElementType};

use serde::{Deserialize, Serialize};

/// A 2D point in grid units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point moved by `(dx, dy)`
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Check whether two points coincide within `tolerance`
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check whether the point lies inside or on the box
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    /// Check whether two boxes share more than `tolerance` along both axes
    pub fn overlaps(&self, other: &Bounds, tolerance: f64) -> bool {
        self.min_x < other.max_x - tolerance
            && other.min_x < self.max_x - tolerance
            && self.min_y < other.max_y - tolerance
            && other.min_y < self.max_y - tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_helpers() {
        let p = Point::new(1.0, 2.0).translated(0.5, -1.0);
        assert_eq!(p, Point::new(1.5, 1.0));
        assert!(p.approx_eq(&Point::new(1.5005, 1.0), 0.001));
        assert_eq!(Point::from((3.0, 4.0)), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_bounds_overlap_excludes_touching() {
        let a = Bounds { min_x: 0.0, min_y: 0.0, max_x: 4.0, max_y: 4.0 };
        let b = Bounds { min_x: 4.0, min_y: 0.0, max_x: 8.0, max_y: 4.0 };
        let c = Bounds { min_x: 3.0, min_y: 3.0, max_x: 5.0, max_y: 5.0 };
        assert!(!a.overlaps(&b, 0.0));
        assert!(a.overlaps(&c, 0.0));
        assert_eq!(a.center(), Point::new(2.0, 2.0));
    }
}
