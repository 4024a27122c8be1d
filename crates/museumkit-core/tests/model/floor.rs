use museumkit_core::data::*;

fn gallery_floor() -> Floor {
    let mut floor = Floor::new("First", 1).with_id("f1");
    floor
        .rooms
        .push(Room::rectangle("Gallery", Point::new(0.0, 0.0), Point::new(6.0, 4.0)).with_id("g"));
    floor.walls.push(
        Wall::new(Point::new(3.0, 0.0), Point::new(3.0, 2.0), 0.15)
            .with_id("w")
            .with_room("g"),
    );
    floor.doors.push(
        Door::new(Point::new(3.0, 0.5), Point::new(3.0, 1.5))
            .with_id("d")
            .between("g", None)
            .on_wall("w"),
    );
    floor
        .artworks
        .push(Artwork::new("Portrait", Point::new(4.0, 1.0), [1.0, 1.0]).with_id("a"));
    floor
}

#[test]
fn test_element_index_covers_every_kind() {
    let floor = gallery_floor();
    let index = floor.element_index();
    assert_eq!(index.len(), 4);
    assert_eq!(index.get(&ElementId::new("d")), Some(&ElementType::Door));
    assert_eq!(index.get(&ElementId::new("a")), Some(&ElementType::Artwork));
}

#[test]
fn test_door_wall_reference_must_resolve() {
    let mut floor = gallery_floor();
    assert!(floor.check_integrity().is_ok());

    floor.walls.clear();
    let err = floor.check_integrity().unwrap_err();
    assert_eq!(
        err,
        museumkit_core::InvariantViolation::DanglingReference {
            floor_id: "f1".to_string(),
            owner: "d".to_string(),
            element_type: ElementType::Wall,
            id: "w".to_string(),
        }
    );
}

#[test]
fn test_room_edges_close_the_polygon() {
    let floor = gallery_floor();
    let room = floor.room(&"g".into()).unwrap();
    let edges: Vec<_> = room.edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3].1, room.polygon[0]);
}
