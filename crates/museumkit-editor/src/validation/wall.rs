use museumkit_core::{ElementId, Floor, Point, Room, Wall};

use super::{ValidationCode, ValidationContext, ValidationResult};
use crate::geometry::{distance, path_length, polyline_on_boundary, polyline_within_polygon, polylines_intersect};

/// Room whose interior holds the whole wall path
///
/// A wall lying entirely on a shared boundary belongs to no single room
/// and yields `None`.
pub fn find_host_room<'a>(points: &[Point], floor: &'a Floor, tolerance: f64) -> Option<&'a Room> {
    let mut hosts = floor
        .rooms
        .iter()
        .filter(|room| polyline_within_polygon(points, &room.polygon, tolerance));
    let first = hosts.next()?;
    if polyline_on_boundary(points, &first.polygon, tolerance) {
        return None;
    }
    Some(first)
}

/// Every point of the path sits on some room boundary
fn runs_along_boundaries(points: &[Point], floor: &Floor, tolerance: f64) -> bool {
    let on_any = |p: &Point| {
        floor
            .rooms
            .iter()
            .any(|room| crate::geometry::is_point_on_polygon_boundary(*p, &room.polygon, tolerance))
    };
    points.iter().all(on_any)
        && points
            .windows(2)
            .all(|w| on_any(&crate::geometry::segment_midpoint(w[0], w[1])))
}

/// Validate a wall against the rooms and walls of its floor.
///
/// Interior walls must stay inside one room; exterior walls must run along
/// room boundaries. Anything else is a containment failure.
pub fn validate_wall_placement(wall: &Wall, ctx: &ValidationContext<'_>) -> ValidationResult {
    let constraints = &ctx.config.constraints;
    let tolerance = constraints.attachment_tolerance;

    let degenerate_path = wall.path.as_ref().is_some_and(|path| path.len() < 2);
    let points = wall.points();
    if degenerate_path || points.windows(2).any(|w| distance(w[0], w[1]) == 0.0) {
        return ValidationResult::error(
            ValidationCode::WallInvalidShape,
            "A wall needs at least two distinct points",
        );
    }

    let length = path_length(points);
    if length < constraints.min_wall_length {
        return ValidationResult::error(
            ValidationCode::WallTooShort,
            format!(
                "Wall length {:.2} is below the minimum of {:.2} grid units",
                length, constraints.min_wall_length
            ),
        )
        .with_suggestions(["Extend the wall"]);
    }

    if wall.thickness < constraints.min_wall_thickness || wall.thickness > constraints.max_wall_thickness {
        return ValidationResult::error(
            ValidationCode::WallInvalidThickness,
            format!(
                "Wall thickness {:.2} m must be between {:.2} and {:.2} m",
                wall.thickness, constraints.min_wall_thickness, constraints.max_wall_thickness
            ),
        );
    }

    let host = find_host_room(points, ctx.floor, tolerance);
    if host.is_none() && !runs_along_boundaries(points, ctx.floor, tolerance) {
        return ValidationResult::error(
            ValidationCode::WallOutsideRoom,
            "Wall must lie inside a single room or along a room boundary",
        )
        .with_suggestions(["Draw the wall inside a room", "Snap the wall onto a room edge"]);
    }

    let crossing: Vec<ElementId> = ctx
        .floor
        .walls
        .iter()
        .filter(|other| !ctx.skips(&other.id, &wall.id))
        .filter(|other| polylines_intersect(points, other.points()))
        .map(|other| other.id.clone())
        .collect();
    if !crossing.is_empty() {
        return ValidationResult::error(
            ValidationCode::WallIntersection,
            format!("Wall crosses {} other wall(s)", crossing.len()),
        )
        .with_affected(crossing);
    }

    match (&wall.room_id, host) {
        (Some(declared), Some(room)) if declared != &room.id => {
            return ValidationResult::warning(
                ValidationCode::WallRoomMismatch,
                format!("Wall is declared in room {} but lies in room {}", declared, room.id),
            )
            .with_affected([room.id.clone()]);
        }
        (Some(declared), None) if ctx.floor.room(declared).is_none() => {
            return ValidationResult::warning(
                ValidationCode::WallRoomMismatch,
                format!("Wall references unknown room {}", declared),
            );
        }
        _ => {}
    }

    let result = ValidationResult::ok(ValidationCode::WallValid, "Wall is valid");
    match host {
        Some(room) => result.with_affected([room.id.clone()]),
        None => result,
    }
}
