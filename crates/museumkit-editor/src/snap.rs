//! Snapping of pointer positions onto the grid and nearby geometry.
//!
//! Candidates are ranked by priority first and distance second, so a room
//! corner within reach always beats the nearest grid intersection.

use museumkit_core::{ElementId, ElementType, Floor, Point};

use crate::geometry::{distance, project_point_onto_segment};

/// Round a point to the nearest multiple of `grid_size`
///
/// A non-positive grid size leaves the point untouched.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Round to the grid, then prefer an existing vertex within `vertex_threshold`
pub fn snap_to_grid_or_vertex<I>(point: Point, grid_size: f64, vertices: I, vertex_threshold: f64) -> Point
where
    I: IntoIterator<Item = Point>,
{
    vertices
        .into_iter()
        .map(|v| (v, distance(point, v)))
        .filter(|(_, d)| *d <= vertex_threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(v, _)| v)
        .unwrap_or_else(|| snap_to_grid(point, grid_size))
}

/// What a snap candidate latched onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    RoomVertex,
    WallEndpoint,
    RoomEdge,
    WallSegment,
    Grid,
}

impl SnapKind {
    pub fn priority(self) -> u8 {
        match self {
            SnapKind::RoomVertex => 15,
            SnapKind::WallEndpoint => 14,
            SnapKind::RoomEdge => 12,
            SnapKind::WallSegment => 11,
            SnapKind::Grid => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapCandidate {
    pub point: Point,
    pub kind: SnapKind,
    pub element: Option<(ElementId, ElementType)>,
    pub distance: f64,
}

/// Snapping parameters
#[derive(Debug, Clone)]
pub struct SnapOptions {
    pub grid_size: f64,
    /// Reach for vertices and endpoints
    pub vertex_threshold: f64,
    /// Reach for edges and wall segments
    pub segment_threshold: f64,
    pub snap_to_grid: bool,
    pub snap_to_elements: bool,
    /// Elements that must not attract the point (usually the one being dragged)
    pub exclude_ids: Vec<ElementId>,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            vertex_threshold: 0.3,
            segment_threshold: 0.8,
            snap_to_grid: true,
            snap_to_elements: true,
            exclude_ids: Vec::new(),
        }
    }
}

impl SnapOptions {
    pub fn from_config(config: &museumkit_settings::EditorConfig) -> Self {
        Self {
            grid_size: config.grid.grid_size,
            vertex_threshold: config.grid.vertex_snap_threshold,
            segment_threshold: config.grid.snap_threshold,
            ..Self::default()
        }
    }

    pub fn excluding(mut self, id: ElementId) -> Self {
        self.exclude_ids.push(id);
        self
    }
}

/// Collect every snap candidate within reach, best first
pub fn find_snap_candidates(point: Point, floor: &Floor, options: &SnapOptions) -> Vec<SnapCandidate> {
    let mut candidates = Vec::new();
    let excluded = |id: &ElementId| options.exclude_ids.contains(id);

    if options.snap_to_elements {
        for room in floor.rooms.iter().filter(|r| !excluded(&r.id)) {
            let element = Some((room.id.clone(), ElementType::Room));
            for vertex in &room.polygon {
                let d = distance(point, *vertex);
                if d <= options.vertex_threshold {
                    candidates.push(SnapCandidate {
                        point: *vertex,
                        kind: SnapKind::RoomVertex,
                        element: element.clone(),
                        distance: d,
                    });
                }
            }
            for (a, b) in room.edges() {
                let on_edge = project_point_onto_segment(point, a, b);
                let d = distance(point, on_edge);
                if d <= options.segment_threshold {
                    candidates.push(SnapCandidate {
                        point: on_edge,
                        kind: SnapKind::RoomEdge,
                        element: element.clone(),
                        distance: d,
                    });
                }
            }
        }

        for wall in floor.walls.iter().filter(|w| !excluded(&w.id)) {
            let element = Some((wall.id.clone(), ElementType::Wall));
            let points = wall.points();
            for endpoint in [points[0], points[points.len() - 1]] {
                let d = distance(point, endpoint);
                if d <= options.vertex_threshold {
                    candidates.push(SnapCandidate {
                        point: endpoint,
                        kind: SnapKind::WallEndpoint,
                        element: element.clone(),
                        distance: d,
                    });
                }
            }
            for (a, b) in wall.segments() {
                let on_wall = project_point_onto_segment(point, a, b);
                let d = distance(point, on_wall);
                if d <= options.segment_threshold {
                    candidates.push(SnapCandidate {
                        point: on_wall,
                        kind: SnapKind::WallSegment,
                        element: element.clone(),
                        distance: d,
                    });
                }
            }
        }
    }

    if options.snap_to_grid {
        let on_grid = snap_to_grid(point, options.grid_size);
        candidates.push(SnapCandidate {
            point: on_grid,
            kind: SnapKind::Grid,
            element: None,
            distance: distance(point, on_grid),
        });
    }

    candidates.sort_by(|a, b| {
        b.kind
            .priority()
            .cmp(&a.kind.priority())
            .then(a.distance.total_cmp(&b.distance))
    });
    candidates
}

/// Best snap for `point`, or `None` when nothing is in reach and grid
/// snapping is off
pub fn snap_point(point: Point, floor: &Floor, options: &SnapOptions) -> Option<SnapCandidate> {
    find_snap_candidates(point, floor, options).into_iter().next()
}
