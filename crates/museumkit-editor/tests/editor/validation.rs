use museumkit_core::{Artwork, Door, ElementId, Floor, Point, Room, Wall};
use museumkit_editor::{
    validate_artwork_placement, validate_door_placement, validate_room_placement, validate_wall_placement,
    Severity, ValidationCode, ValidationContext,
};
use museumkit_settings::EditorConfig;

fn square(name: &str, x: f64, y: f64, side: f64) -> Room {
    Room::rectangle(name, Point::new(x, y), Point::new(x + side, y + side))
}

#[test]
fn test_square_room_is_valid() {
    let floor = Floor::new("Ground", 0);
    let config = EditorConfig::default();
    let ctx = ValidationContext::new(&floor, &config);

    let room = Room::new(
        "Square",
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ],
    );
    let result = validate_room_placement(&room, &ctx);
    assert!(result.valid);
    assert_eq!(result.code, ValidationCode::RoomValid);
}

#[test]
fn test_overlapping_room_is_an_error() {
    let mut floor = Floor::new("Ground", 0);
    floor.rooms.push(square("A", 0.0, 0.0, 4.0));
    let config = EditorConfig::default();
    let ctx = ValidationContext::new(&floor, &config);

    let result = validate_room_placement(&square("B", 2.0, 2.0, 4.0), &ctx);
    assert!(!result.valid);
    assert_eq!(result.severity, Severity::Error);
    assert_eq!(result.code, ValidationCode::RoomOverlapping);

    // sharing an edge is fine
    let neighbour = validate_room_placement(&square("C", 4.0, 0.0, 4.0), &ctx);
    assert!(neighbour.valid, "{}", neighbour.message);
}

#[test]
fn test_wall_outside_every_room() {
    let mut floor = Floor::new("Ground", 0);
    floor.rooms.push(square("A", 0.0, 0.0, 4.0));
    let config = EditorConfig::default();
    let ctx = ValidationContext::new(&floor, &config);

    let wall = Wall::new(Point::new(10.0, 10.0), Point::new(12.0, 10.0), 0.2);
    let result = validate_wall_placement(&wall, &ctx);
    assert!(!result.valid);
    assert_eq!(result.code, ValidationCode::WallOutsideRoom);
}

#[test]
fn test_door_needs_a_wall() {
    let mut floor = Floor::new("Ground", 0);
    floor.rooms.push(square("A", 0.0, 0.0, 8.0));
    floor
        .walls
        .push(Wall::new(Point::new(4.0, 0.0), Point::new(4.0, 6.0), 0.2).with_id("w"));
    let config = EditorConfig::default();
    let ctx = ValidationContext::new(&floor, &config);

    let on_wall = validate_door_placement(&Door::new(Point::new(4.0, 1.0), Point::new(4.0, 3.0)), &ctx);
    assert!(on_wall.valid);
    assert_eq!(on_wall.affected_elements, vec![ElementId::new("w")]);

    let loose = validate_door_placement(&Door::new(Point::new(2.0, 1.0), Point::new(2.0, 3.0)), &ctx);
    assert_eq!(loose.code, ValidationCode::DoorNotOnWall);
}

#[test]
fn test_artworks_in_one_zone_may_overlap() {
    let mut floor = Floor::new("Ground", 0);
    floor.rooms.push(square("Gallery", 0.0, 0.0, 8.0));
    floor
        .artworks
        .push(Artwork::new("Left", Point::new(1.0, 1.0), [2.0, 2.0]).in_zone("triptych"));
    let config = EditorConfig::default();
    let ctx = ValidationContext::new(&floor, &config);

    let same_zone = Artwork::new("Middle", Point::new(2.0, 1.0), [2.0, 2.0]).in_zone("triptych");
    assert!(validate_artwork_placement(&same_zone, &ctx).valid);

    let stranger = Artwork::new("Other", Point::new(2.0, 1.0), [2.0, 2.0]);
    assert_eq!(
        validate_artwork_placement(&stranger, &ctx).code,
        ValidationCode::ArtworkOverlapping
    );
}

#[test]
fn test_strict_mode_blocks_warnings() {
    let mut floor = Floor::new("Ground", 0);
    floor.rooms.push(square("A", 0.0, 0.0, 4.0).with_id("a"));
    floor.rooms.push(square("B", 6.0, 0.0, 4.0).with_id("b"));
    let config = EditorConfig::default();
    let ctx = ValidationContext::new(&floor, &config);

    // interior of A, but declared for B
    let wall = Wall::new(Point::new(1.0, 1.0), Point::new(3.0, 1.0), 0.2).with_room("b");
    let result = validate_wall_placement(&wall, &ctx);
    assert_eq!(result.code, ValidationCode::WallRoomMismatch);
    assert!(result.valid);
    assert!(!result.blocks_commit(false));
    assert!(result.blocks_commit(true));
}
