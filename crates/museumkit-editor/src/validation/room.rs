use museumkit_core::{ElementId, Room};

use super::{ValidationCode, ValidationContext, ValidationResult};
use crate::geometry::{find_duplicate_points, is_self_intersecting, polygon_area_m2, polygons_overlap};

/// Validate a room outline against the rooms already on the floor.
///
/// Rooms may share edges and corners with their neighbours but their
/// interiors must not interpenetrate beyond the configured tolerance.
pub fn validate_room_placement(room: &Room, ctx: &ValidationContext<'_>) -> ValidationResult {
    let constraints = &ctx.config.constraints;
    let polygon = &room.polygon;

    if polygon.len() < 3 {
        return ValidationResult::error(
            ValidationCode::RoomInvalidShape,
            format!("A room needs at least 3 vertices, got {}", polygon.len()),
        )
        .with_suggestions(["Add more points to close the outline"]);
    }

    if let Some((i, j)) = find_duplicate_points(polygon, constraints.duplicate_point_tolerance) {
        return ValidationResult::error(
            ValidationCode::RoomDuplicatePoints,
            format!("Vertices {} and {} of the room coincide", i, j),
        );
    }

    if is_self_intersecting(polygon) {
        return ValidationResult::error(
            ValidationCode::RoomSelfIntersecting,
            "Room edges must not cross each other",
        )
        .with_suggestions(["Reorder the vertices so the outline does not cross itself"]);
    }

    let area = polygon_area_m2(
        polygon,
        ctx.config.grid.grid_to_meters,
        ctx.config.grid.measurement_precision,
    );
    if area < constraints.min_room_area {
        return ValidationResult::error(
            ValidationCode::RoomTooSmall,
            format!(
                "Room area {:.2} m² is below the minimum of {:.2} m²",
                area, constraints.min_room_area
            ),
        )
        .with_suggestions(["Enlarge the room"]);
    }
    if area > constraints.max_room_area {
        return ValidationResult::error(
            ValidationCode::RoomTooLarge,
            format!(
                "Room area {:.2} m² exceeds the maximum of {:.2} m²",
                area, constraints.max_room_area
            ),
        )
        .with_suggestions(["Split the space into several rooms"]);
    }

    let overlapping: Vec<ElementId> = ctx
        .floor
        .rooms
        .iter()
        .filter(|other| !ctx.skips(&other.id, &room.id))
        .filter(|other| polygons_overlap(polygon, &other.polygon, constraints.room_overlap_tolerance))
        .map(|other| other.id.clone())
        .collect();

    if !overlapping.is_empty() {
        return ValidationResult::error(
            ValidationCode::RoomOverlapping,
            format!("Room overlaps {} existing room(s)", overlapping.len()),
        )
        .with_affected(overlapping)
        .with_suggestions([
            "Move the room",
            "Reduce its size",
            "Rooms may touch but must not overlap",
        ]);
    }

    ValidationResult::ok(
        ValidationCode::RoomValid,
        format!("Room is valid ({:.2} m²)", area),
    )
}
