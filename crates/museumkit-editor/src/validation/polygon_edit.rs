use museumkit_core::Point;
use museumkit_settings::Constraints;

use super::{ValidationCode, ValidationResult};
use crate::geometry::{distance, is_self_intersecting};

/// Check inserting `point` before position `index` of a room outline.
///
/// `index == polygon.len()` appends after the last vertex.
pub fn validate_point_addition(
    polygon: &[Point],
    point: Point,
    index: usize,
    constraints: &Constraints,
) -> ValidationResult {
    if index > polygon.len() {
        return ValidationResult::error(
            ValidationCode::RoomInvalidShape,
            format!("Insert position {} is past the end of the outline", index),
        );
    }

    if let Some(existing) = polygon
        .iter()
        .position(|p| distance(*p, point) < constraints.duplicate_point_tolerance)
    {
        return ValidationResult::error(
            ValidationCode::RoomDuplicatePoints,
            format!("New vertex coincides with vertex {}", existing),
        );
    }

    let mut edited = polygon.to_vec();
    edited.insert(index, point);
    if is_self_intersecting(&edited) {
        return ValidationResult::error(
            ValidationCode::RoomSelfIntersecting,
            "Adding this vertex would make the outline cross itself",
        );
    }

    ValidationResult::ok(ValidationCode::RoomValid, "Vertex can be added")
}

/// Check removing vertex `index` from a room outline
pub fn validate_point_removal(polygon: &[Point], index: usize) -> ValidationResult {
    if index >= polygon.len() {
        return ValidationResult::error(
            ValidationCode::RoomInvalidShape,
            format!("Vertex {} does not exist", index),
        );
    }
    if polygon.len() <= 3 {
        return ValidationResult::error(
            ValidationCode::RoomInvalidShape,
            "A room needs at least 3 vertices",
        )
        .with_suggestions(["Delete the room instead"]);
    }

    let mut edited = polygon.to_vec();
    edited.remove(index);
    if is_self_intersecting(&edited) {
        return ValidationResult::error(
            ValidationCode::RoomSelfIntersecting,
            "Removing this vertex would make the outline cross itself",
        );
    }

    ValidationResult::ok(ValidationCode::RoomValid, "Vertex can be removed")
}
