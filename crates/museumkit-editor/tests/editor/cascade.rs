use std::collections::HashSet;

use museumkit_core::{Artwork, Door, ElementId, ElementType, Floor, LinkKind, Point, Room, VerticalLink, Wall};
use museumkit_editor::cascade::removal_priority;
use museumkit_editor::{analyze_deletion_plan, commit_deletion};

/// Room R holding wall W and artwork A, with door D on W
fn gallery() -> Vec<Floor> {
    let mut ground = Floor::new("Ground", 0).with_id("f0");
    ground
        .rooms
        .push(Room::rectangle("R", Point::new(0.0, 0.0), Point::new(8.0, 8.0)).with_id("R"));
    ground
        .walls
        .push(Wall::new(Point::new(4.0, 0.0), Point::new(4.0, 6.0), 0.2).with_id("W").with_room("R"));
    ground
        .doors
        .push(Door::new(Point::new(4.0, 2.0), Point::new(4.0, 4.0)).with_id("D").on_wall("W"));
    ground
        .artworks
        .push(Artwork::new("A", Point::new(1.0, 1.0), [1.0, 1.0]).with_id("A"));
    vec![ground]
}

#[test]
fn test_room_plan_orders_leaves_first() {
    let floors = gallery();
    let plan = analyze_deletion_plan(&"R".into(), ElementType::Room, &floors).unwrap();

    let priority = |id: &str| {
        plan.removal_order()
            .into_iter()
            .find(|(_, eid, _, _)| eid.as_str() == id)
            .map(|(_, _, _, p)| p)
            .unwrap()
    };
    assert!(priority("D") < priority("W"));
    assert!(priority("A") < priority("W"));
    assert!(priority("W") < priority("R"));
    assert_eq!(plan.estimated_impact.total_elements, 4);

    let member = |id: &str| plan.cascade.iter().find(|m| m.id.as_str() == id).unwrap();
    assert_eq!(member("D").depends_on, ElementId::new("W"));
    assert_eq!(member("W").depends_on, ElementId::new("R"));
    assert_eq!(member("A").depends_on, ElementId::new("R"));
}

#[test]
fn test_removal_order_never_touches_removed_parent() {
    let floors = gallery();
    let plan = analyze_deletion_plan(&"R".into(), ElementType::Room, &floors).unwrap();

    let mut removed = HashSet::new();
    for (_, id, _, _) in plan.removal_order() {
        let member = plan.cascade.iter().find(|m| &m.id == id);
        if let Some(member) = member {
            assert!(
                !removed.contains(&member.depends_on),
                "{} removed after its parent {}",
                id,
                member.depends_on
            );
            assert!(member.priority < removal_priority(member.depends_on_type));
        }
        removed.insert(id.clone());
    }

    let result = commit_deletion(&plan, &floors);
    assert!(result.orphaned_elements.is_empty());
    assert!(result.floors[0].is_empty());
}

#[test]
fn test_deleting_floor_orphans_link_on_other_floor() {
    let mut floors = gallery();
    floors[0].vertical_links.push(
        VerticalLink::new(LinkKind::Elevator, Point::new(6.0, 6.0), Point::new(7.0, 6.0), 1.0)
            .with_id("lift")
            .to_floor("f1"),
    );
    let mut first = Floor::new("First", 1).with_id("f1");
    first.vertical_links.push(
        VerticalLink::new(LinkKind::Elevator, Point::new(6.0, 6.0), Point::new(7.0, 6.0), 1.0)
            .with_id("lift-up")
            .with_master("lift")
            .to_floor("f0"),
    );
    first
        .rooms
        .push(Room::rectangle("Upper", Point::new(0.0, 0.0), Point::new(8.0, 8.0)).with_id("U"));
    floors.push(first);

    let plan = analyze_deletion_plan(&"f0".into(), ElementType::Floor, &floors).unwrap();
    assert!(plan.has_critical_warnings());
    assert!(plan.critical_warnings.iter().any(|w| w.contains("lift-up")));
    assert_eq!(plan.orphaned_links.len(), 1);
    assert!(!plan.removes(&"lift-up".into()));
    assert!(!plan.removes(&"U".into()));

    let result = commit_deletion(&plan, &floors);
    assert_eq!(result.floors.len(), 1);
    let survivor = &result.floors[0].vertical_links[0];
    assert_eq!(survivor.id.as_str(), "lift-up");
    assert_eq!(survivor.to_floor_id, None);
    assert_eq!(result.unlinked, vec![ElementId::new("lift-up")]);
    assert_eq!(result.floors[0].rooms.len(), 1);
}

#[test]
fn test_deleting_shared_door_wall_warns_other_room() {
    let mut floors = gallery();
    floors[0]
        .rooms
        .push(Room::rectangle("Annex", Point::new(8.0, 0.0), Point::new(12.0, 8.0)).with_id("X"));
    floors[0].walls.push(
        Wall::new(Point::new(8.0, 0.0), Point::new(8.0, 8.0), 0.2)
            .with_id("shared")
            .load_bearing(),
    );
    floors[0].doors.push(
        Door::new(Point::new(8.0, 3.0), Point::new(8.0, 5.0))
            .with_id("link-door")
            .between("R", Some("X".into()))
            .on_wall("shared"),
    );

    let plan = analyze_deletion_plan(&"shared".into(), ElementType::Wall, &floors).unwrap();
    assert!(plan.removes(&"link-door".into()));
    assert!(plan.warnings.iter().any(|w| w.contains("load-bearing")));
    assert!(plan.warnings.iter().any(|w| w.contains("Room R loses door link-door")));
    assert!(plan.warnings.iter().any(|w| w.contains("Room Annex loses door link-door")));
}

#[test]
fn test_unknown_target_is_not_found() {
    let floors = gallery();
    let err = analyze_deletion_plan(&"ghost".into(), ElementType::Artwork, &floors).unwrap_err();
    assert!(matches!(err, museumkit_core::ModelError::ElementNotFound { .. }));
}
