//! Geometry kernel
//!
//! Pure 2D primitives over plan coordinates (grid units). Every function is
//! total: degenerate input such as a polygon with fewer than three points
//! yields a degenerate answer (zero area, no containment) instead of
//! panicking. Deciding whether such input is acceptable is the validator's
//! job.

use museumkit_core::units::{area_to_square_meters, grid_to_meters, round_to};
use museumkit_core::{Bounds, Point};

/// Tolerance used for orientation and on-segment tests
pub const EPSILON: f64 = 1e-9;

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Distance between two points in meters
pub fn distance_m(a: Point, b: Point, grid_to_meters_factor: f64) -> f64 {
    grid_to_meters(distance(a, b), grid_to_meters_factor)
}

/// Total length of an open polyline
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Closed boundary edges of a polygon
pub fn edges(polygon: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| (polygon[i], polygon[(i + 1) % n]))
}

/// Signed polygon area in square grid units (shoelace formula)
///
/// Positive for counter-clockwise winding in a y-up frame.
pub fn signed_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    edges(polygon)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
        / 2.0
}

/// Unsigned polygon area in square grid units
pub fn polygon_area(polygon: &[Point]) -> f64 {
    signed_area(polygon).abs()
}

/// Polygon area in square meters, rounded to `precision` decimals
pub fn polygon_area_m2(polygon: &[Point], grid_to_meters_factor: f64, precision: u32) -> f64 {
    round_to(
        area_to_square_meters(polygon_area(polygon), grid_to_meters_factor),
        precision,
    )
}

/// Average of the polygon vertices
pub fn polygon_center(polygon: &[Point]) -> Point {
    if polygon.is_empty() {
        return Point::default();
    }
    let n = polygon.len() as f64;
    let (sx, sy) = polygon
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

pub fn segment_midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Axis-aligned bounds; all zeros for an empty slice
pub fn bounds(points: &[Point]) -> Bounds {
    let Some(first) = points.first() else {
        return Bounds::default();
    };
    points.iter().skip(1).fold(
        Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        },
        |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        },
    )
}

/// Cross product of `(b - a)` and `(c - a)`
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Winding-number point-in-polygon test
///
/// Points exactly on the boundary may land on either side; combine with
/// [`is_point_on_polygon_boundary`] when the boundary matters.
pub fn is_point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut winding = 0i32;
    for (a, b) in edges(polygon) {
        if a.y <= point.y {
            if b.y > point.y && orientation(a, b, point) > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && orientation(a, b, point) < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Closest point to `point` on the segment `a`-`b`
pub fn project_point_onto_segment(point: Point, a: Point, b: Point) -> Point {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return a;
    }
    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    Point::new(a.x + t * dx, a.y + t * dy)
}

pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    distance(point, project_point_onto_segment(point, a, b))
}

/// Perpendicular distance from `point` to the infinite line through `a` and `b`
pub fn distance_to_line(point: Point, a: Point, b: Point) -> f64 {
    let len = distance(a, b);
    if len == 0.0 {
        return distance(point, a);
    }
    orientation(a, b, point).abs() / len
}

/// Position of the projection of `point` along `a`-`b`, unclamped (0 at `a`, 1 at `b`)
pub fn projection_parameter(point: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return 0.0;
    }
    ((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq
}

pub fn is_point_on_segment(point: Point, a: Point, b: Point, tolerance: f64) -> bool {
    distance_to_segment(point, a, b) <= tolerance
}

/// Minimum distance from `point` to any polygon edge
pub fn distance_to_boundary(point: Point, polygon: &[Point]) -> f64 {
    edges(polygon)
        .map(|(a, b)| distance_to_segment(point, a, b))
        .fold(f64::INFINITY, f64::min)
}

pub fn is_point_on_polygon_boundary(point: Point, polygon: &[Point], tolerance: f64) -> bool {
    polygon.len() >= 2 && distance_to_boundary(point, polygon) <= tolerance
}

/// Inside the polygon or within `tolerance` of its boundary
pub fn is_point_inside_or_on(point: Point, polygon: &[Point], tolerance: f64) -> bool {
    is_point_in_polygon(point, polygon) || is_point_on_polygon_boundary(point, polygon, tolerance)
}

/// Inside the polygon and farther than `tolerance` from its boundary
pub fn is_point_strictly_inside(point: Point, polygon: &[Point], tolerance: f64) -> bool {
    is_point_in_polygon(point, polygon) && distance_to_boundary(point, polygon) > tolerance
}

/// Proper crossing of two segments
///
/// Touching at an endpoint or running collinear does not count.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
        && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
}

/// Crossing point of two properly intersecting segments
pub fn segment_intersection_point(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    if !segments_intersect(a1, a2, b1, b2) {
        return None;
    }
    let denom = (a2.x - a1.x) * (b2.y - b1.y) - (a2.y - a1.y) * (b2.x - b1.x);
    if denom.abs() < EPSILON {
        return None;
    }
    let t = ((b1.x - a1.x) * (b2.y - b1.y) - (b1.y - a1.y) * (b2.x - b1.x)) / denom;
    Some(Point::new(a1.x + t * (a2.x - a1.x), a1.y + t * (a2.y - a1.y)))
}

/// Non-adjacent polygon edges cross each other
pub fn is_self_intersecting(polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 4 {
        return false;
    }
    for i in 0..n {
        let (a1, a2) = (polygon[i], polygon[(i + 1) % n]);
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b1, b2) = (polygon[j], polygon[(j + 1) % n]);
            if segments_intersect(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}

/// First pair of vertices closer than `tolerance`, as indices
pub fn find_duplicate_points(polygon: &[Point], tolerance: f64) -> Option<(usize, usize)> {
    for i in 0..polygon.len() {
        for j in (i + 1)..polygon.len() {
            if distance(polygon[i], polygon[j]) < tolerance {
                return Some((i, j));
            }
        }
    }
    None
}

/// A point guaranteed to lie inside a simple polygon
///
/// Tries the centroid of each vertex's ear triangle and falls back to the
/// vertex average.
pub fn interior_point(polygon: &[Point]) -> Point {
    let n = polygon.len();
    if n < 3 {
        return polygon_center(polygon);
    }
    for i in 0..n {
        let (prev, cur, next) = (polygon[(i + n - 1) % n], polygon[i], polygon[(i + 1) % n]);
        let candidate = Point::new(
            (prev.x + cur.x + next.x) / 3.0,
            (prev.y + cur.y + next.y) / 3.0,
        );
        if is_point_strictly_inside(candidate, polygon, EPSILON) {
            return candidate;
        }
    }
    polygon_center(polygon)
}

/// Sample points used by the overlap tests: vertices, edge midpoints and
/// one interior point
fn sample_points(polygon: &[Point]) -> impl Iterator<Item = Point> + '_ {
    polygon
        .iter()
        .copied()
        .chain(edges(polygon).map(|(a, b)| segment_midpoint(a, b)))
        .chain(std::iter::once(interior_point(polygon)))
}

fn crossing_is_deep(a1: Point, a2: Point, b1: Point, b2: Point, tolerance: f64) -> bool {
    match segment_intersection_point(a1, a2, b1, b2) {
        Some(x) => [a1, a2, b1, b2]
            .iter()
            .all(|endpoint| distance(x, *endpoint) > tolerance),
        None => false,
    }
}

/// Interiors of two polygons interpenetrate by more than `tolerance`
///
/// Shared edges and touching vertices are not overlap.
pub fn polygons_overlap(a: &[Point], b: &[Point], tolerance: f64) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    if !bounds(a).overlaps(&bounds(b), tolerance) {
        return false;
    }

    for (a1, a2) in edges(a) {
        for (b1, b2) in edges(b) {
            if crossing_is_deep(a1, a2, b1, b2, tolerance) {
                return true;
            }
        }
    }

    sample_points(a).any(|p| is_point_strictly_inside(p, b, tolerance))
        || sample_points(b).any(|p| is_point_strictly_inside(p, a, tolerance))
}

/// Every point of `inner` lies inside or on `outer` and no boundary of
/// `outer` cuts through `inner`
pub fn polygon_contains_polygon(outer: &[Point], inner: &[Point], tolerance: f64) -> bool {
    if outer.len() < 3 || inner.is_empty() {
        return false;
    }
    if !inner
        .iter()
        .all(|p| is_point_inside_or_on(*p, outer, tolerance))
    {
        return false;
    }
    for (a1, a2) in edges(inner) {
        for (b1, b2) in edges(outer) {
            if segments_intersect(a1, a2, b1, b2) {
                return false;
            }
        }
    }
    !outer
        .iter()
        .any(|p| inner.len() >= 3 && is_point_strictly_inside(*p, inner, tolerance))
}

/// An open polyline stays inside or on the polygon
pub fn polyline_within_polygon(points: &[Point], polygon: &[Point], tolerance: f64) -> bool {
    if polygon.len() < 3 || points.is_empty() {
        return false;
    }
    if !points
        .iter()
        .all(|p| is_point_inside_or_on(*p, polygon, tolerance))
    {
        return false;
    }
    points.windows(2).all(|w| {
        let mid = segment_midpoint(w[0], w[1]);
        is_point_inside_or_on(mid, polygon, tolerance)
            && !edges(polygon).any(|(b1, b2)| segments_intersect(w[0], w[1], b1, b2))
    })
}

/// Every point of the polyline lies on the polygon boundary
pub fn polyline_on_boundary(points: &[Point], polygon: &[Point], tolerance: f64) -> bool {
    !points.is_empty()
        && points.iter().all(|p| is_point_on_polygon_boundary(*p, polygon, tolerance))
        && points.windows(2).all(|w| {
            is_point_on_polygon_boundary(segment_midpoint(w[0], w[1]), polygon, tolerance)
        })
}

/// Two open polylines cross each other
pub fn polylines_intersect(a: &[Point], b: &[Point]) -> bool {
    a.windows(2).any(|sa| {
        b.windows(2)
            .any(|sb| segments_intersect(sa[0], sa[1], sb[0], sb[1]))
    })
}

/// Both endpoints of `a`-`b` lie within `tolerance` of the segment `c`-`d`
pub fn segment_lies_on(a: Point, b: Point, c: Point, d: Point, tolerance: f64) -> bool {
    distance_to_segment(a, c, d) <= tolerance && distance_to_segment(b, c, d) <= tolerance
}

/// Rectangles (as bounds) overlap with positive area
pub fn rectangles_overlap(a: &Bounds, b: &Bounds) -> bool {
    a.overlaps(b, 0.0)
}
