use std::collections::BTreeSet;

use museumkit_core::{Artwork, ElementId, ElementType, Floor, Point, Room, Wall};
use museumkit_editor::{
    analyze_deletion_plan, commit_deletion, validate_room_placement, validate_wall_placement, ValidationCode,
    ValidationContext,
};
use museumkit_settings::EditorConfig;
use proptest::prelude::*;

/// A row of furnished rooms: each with an interior wall and one artwork
fn furnished_floor(id: &str, level: i32, rooms: usize) -> Floor {
    let mut floor = Floor::new(format!("Level {}", level), level).with_id(id);
    for i in 0..rooms {
        let x = 5.0 * i as f64;
        let room_id = format!("{}-room-{}", id, i);
        floor
            .rooms
            .push(Room::rectangle("Room", Point::new(x, 0.0), Point::new(x + 4.0, 4.0)).with_id(room_id.as_str()));
        floor.walls.push(
            Wall::new(Point::new(x + 2.0, 0.0), Point::new(x + 2.0, 3.0), 0.2)
                .with_id(format!("{}-wall-{}", id, i))
                .with_room(room_id.as_str()),
        );
        floor.artworks.push(
            Artwork::new("Piece", Point::new(x + 0.5, 0.5), [1.0, 1.0]).with_id(format!("{}-art-{}", id, i)),
        );
    }
    floor
}

proptest! {
    #[test]
    fn prop_well_formed_rectangle_is_valid(
        x in 0.0f64..50.0,
        y in -20.0f64..20.0,
        w in 2.0f64..20.0,
        h in 2.0f64..20.0,
    ) {
        let mut floor = Floor::new("Ground", 0);
        floor
            .rooms
            .push(Room::rectangle("West", Point::new(-10.0, 0.0), Point::new(0.0, 10.0)));
        let config = EditorConfig::default();
        let ctx = ValidationContext::new(&floor, &config);

        let room = Room::rectangle("New", Point::new(x, y), Point::new(x + w, y + h));
        let result = validate_room_placement(&room, &ctx);
        prop_assert!(result.valid, "{}", result.message);
    }

    #[test]
    fn prop_wall_outside_rooms_is_rejected(
        x in 20.0f64..40.0,
        y in -20.0f64..20.0,
        dx in 1.0f64..10.0,
        dy in -5.0f64..5.0,
    ) {
        let mut floor = Floor::new("Ground", 0);
        floor
            .rooms
            .push(Room::rectangle("Hall", Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
        let config = EditorConfig::default();
        let ctx = ValidationContext::new(&floor, &config);

        let wall = Wall::new(Point::new(x, y), Point::new(x + dx, y + dy), 0.2);
        let result = validate_wall_placement(&wall, &ctx);
        prop_assert!(!result.valid);
        prop_assert_eq!(result.code, ValidationCode::WallOutsideRoom);
    }

    #[test]
    fn prop_floor_deletion_is_exact(deleted in 0usize..5, kept in 0usize..5) {
        let floors = vec![furnished_floor("f0", 0, deleted), furnished_floor("f1", 1, kept)];
        let plan = analyze_deletion_plan(&"f0".into(), ElementType::Floor, &floors).unwrap();
        let result = commit_deletion(&plan, &floors);

        let expected: BTreeSet<ElementId> = floors[0]
            .element_ids()
            .map(|(id, _)| id.clone())
            .chain(std::iter::once(ElementId::new("f0")))
            .collect();
        let removed: BTreeSet<ElementId> = result.removed.values().flatten().cloned().collect();
        prop_assert_eq!(removed, expected);
        prop_assert!(result.orphaned_elements.is_empty());
        prop_assert_eq!(result.floors, vec![floors[1].clone()]);
    }
}
