use museumkit_core::{Door, ElementId, Floor, Point, Wall};

use super::{ValidationCode, ValidationContext, ValidationResult};
use crate::geometry::{distance, distance_to_line, projection_parameter};

/// The door segment runs along one of the wall's segments
fn lies_along(door: &Door, wall: &Wall, tolerance: f64) -> bool {
    wall.segments().any(|(a, b)| {
        let len = distance(a, b);
        if len == 0.0 {
            return false;
        }
        let slack = tolerance / len;
        door.segment.iter().all(|p: &Point| {
            let t = projection_parameter(*p, a, b);
            distance_to_line(*p, a, b) <= tolerance && t >= -slack && t <= 1.0 + slack
        })
    })
}

/// Walls on the floor that could support the door
pub fn find_door_walls<'a>(door: &Door, floor: &'a Floor, tolerance: f64) -> Vec<&'a Wall> {
    floor
        .walls
        .iter()
        .filter(|wall| lies_along(door, wall, tolerance))
        .collect()
}

/// Validate a door against the walls and rooms of its floor.
///
/// A door must sit on exactly one wall. When the door names its wall the
/// reference is checked; otherwise the wall is resolved geometrically and
/// reported in `affected_elements`.
pub fn validate_door_placement(door: &Door, ctx: &ValidationContext<'_>) -> ValidationResult {
    let constraints = &ctx.config.constraints;
    let tolerance = constraints.door_snap_tolerance;

    let width = ctx.to_meters(distance(door.segment[0], door.segment[1]));
    if width < constraints.min_door_width || width > constraints.max_door_width {
        return ValidationResult::error(
            ValidationCode::DoorInvalidWidth,
            format!(
                "Door width {:.2} m must be between {:.2} and {:.2} m",
                width, constraints.min_door_width, constraints.max_door_width
            ),
        );
    }

    let missing_rooms: Vec<ElementId> = door
        .room_ids()
        .filter(|id| ctx.floor.room(id).is_none())
        .cloned()
        .collect();
    if !missing_rooms.is_empty() {
        return ValidationResult::error(
            ValidationCode::DoorRoomNotFound,
            format!("Door references {} unknown room(s)", missing_rooms.len()),
        )
        .with_affected(missing_rooms);
    }

    let wall = match &door.wall_id {
        Some(wall_id) => {
            let Some(wall) = ctx.floor.wall(wall_id) else {
                return ValidationResult::error(
                    ValidationCode::DoorWallNotFound,
                    format!("Door references unknown wall {}", wall_id),
                );
            };
            if !lies_along(door, wall, tolerance) {
                return ValidationResult::error(
                    ValidationCode::DoorNotOnWall,
                    format!("Door is farther than {:.2} from wall {}", tolerance, wall_id),
                )
                .with_affected([wall_id.clone()])
                .with_suggestions(["Snap the door onto the wall"]);
            }
            wall
        }
        None => {
            let candidates: Vec<&Wall> = find_door_walls(door, ctx.floor, tolerance)
                .into_iter()
                .filter(|w| !ctx.exclude_ids.contains(&w.id))
                .collect();
            match candidates.as_slice() {
                [] => {
                    return ValidationResult::error(
                        ValidationCode::DoorNotOnWall,
                        "Door must be placed on a wall",
                    )
                    .with_suggestions(["Snap the door onto a wall"]);
                }
                [wall] => *wall,
                many => {
                    return ValidationResult::error(
                        ValidationCode::DoorAmbiguousWall,
                        format!("Door touches {} walls, expected exactly one", many.len()),
                    )
                    .with_affected(many.iter().map(|w| w.id.clone()));
                }
            }
        }
    };

    ValidationResult::ok(ValidationCode::DoorValid, "Door is valid").with_affected([wall.id.clone()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use museumkit_core::Room;
    use museumkit_settings::EditorConfig;

    fn floor() -> Floor {
        let mut floor = Floor::new("Ground", 0);
        floor
            .rooms
            .push(Room::rectangle("A", Point::new(0.0, 0.0), Point::new(8.0, 4.0)).with_id("a"));
        floor
            .walls
            .push(Wall::new(Point::new(4.0, 0.0), Point::new(4.0, 4.0), 0.2).with_id("w"));
        floor
    }

    #[test]
    fn test_door_resolves_its_wall() {
        let config = EditorConfig::default();
        let floor = floor();
        let door = Door::new(Point::new(4.1, 1.0), Point::new(4.1, 3.0)).between("a", None);
        let result = validate_door_placement(&door, &ValidationContext::new(&floor, &config));
        assert!(result.valid, "{}", result.message);
        assert_eq!(result.affected_elements, vec![ElementId::new("w")]);
    }

    #[test]
    fn test_door_off_wall() {
        let config = EditorConfig::default();
        let floor = floor();
        let door = Door::new(Point::new(5.0, 1.0), Point::new(5.0, 3.0));
        let result = validate_door_placement(&door, &ValidationContext::new(&floor, &config));
        assert_eq!(result.code, ValidationCode::DoorNotOnWall);

        let door = door.on_wall("w");
        let result = validate_door_placement(&door, &ValidationContext::new(&floor, &config));
        assert_eq!(result.code, ValidationCode::DoorNotOnWall);
    }

    #[test]
    fn test_door_past_wall_end() {
        let config = EditorConfig::default();
        let floor = floor();
        let door = Door::new(Point::new(4.0, 3.0), Point::new(4.0, 5.0));
        let result = validate_door_placement(&door, &ValidationContext::new(&floor, &config));
        assert_eq!(result.code, ValidationCode::DoorNotOnWall);
    }

    #[test]
    fn test_door_width_bounds() {
        let config = EditorConfig::default();
        let floor = floor();
        // 0.5 grid units is 0.25 m
        let door = Door::new(Point::new(4.0, 1.0), Point::new(4.0, 1.5));
        let result = validate_door_placement(&door, &ValidationContext::new(&floor, &config));
        assert_eq!(result.code, ValidationCode::DoorInvalidWidth);
    }

    #[test]
    fn test_unknown_references() {
        let config = EditorConfig::default();
        let floor = floor();
        let ctx = ValidationContext::new(&floor, &config);

        let door = Door::new(Point::new(4.0, 1.0), Point::new(4.0, 3.0)).between("a", Some("zz".into()));
        assert_eq!(validate_door_placement(&door, &ctx).code, ValidationCode::DoorRoomNotFound);

        let door = Door::new(Point::new(4.0, 1.0), Point::new(4.0, 3.0)).on_wall("nope");
        assert_eq!(validate_door_placement(&door, &ctx).code, ValidationCode::DoorWallNotFound);
    }

    #[test]
    fn test_door_on_wall_junction_is_ambiguous() {
        let config = EditorConfig::default();
        let mut floor = floor();
        floor
            .walls
            .push(Wall::new(Point::new(4.0, 0.0), Point::new(4.0, 2.5), 0.2).with_id("w2"));
        let door = Door::new(Point::new(4.0, 1.0), Point::new(4.0, 2.0));
        let result = validate_door_placement(&door, &ValidationContext::new(&floor, &config));
        assert_eq!(result.code, ValidationCode::DoorAmbiguousWall);
        assert_eq!(result.affected_elements.len(), 2);
    }
}
