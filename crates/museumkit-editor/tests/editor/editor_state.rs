use museumkit_core::{Artwork, Door, ElementType, LinkKind, PlanDocument, Point, Room, VerticalLink, Wall};
use museumkit_editor::{EditorError, EditorState, StateUpdate, ValidationCode};
use museumkit_settings::{EditorConfig, HistorySettings};

/// Two floors: a gallery with a partition wall, a door and an artwork on
/// the ground floor, and stairs up to an empty upper floor
fn museum() -> EditorState {
    let mut editor = EditorState::default();
    let ground = editor.current_floor_id().clone();
    editor
        .add_room(Room::rectangle("Gallery", Point::new(0.0, 0.0), Point::new(10.0, 8.0)).with_id("gallery"))
        .unwrap();
    editor
        .add_wall(Wall::new(Point::new(5.0, 0.0), Point::new(5.0, 6.0), 0.2).with_id("partition"))
        .unwrap();
    editor
        .add_door(Door::new(Point::new(5.0, 2.0), Point::new(5.0, 4.0)).with_id("door"))
        .unwrap();
    editor
        .add_artwork(Artwork::new("Portrait", Point::new(1.0, 1.0), [2.0, 1.0]).with_id("portrait"))
        .unwrap();
    let upper = editor.add_floor("Upper").unwrap();
    editor.set_current_floor(&ground).unwrap();
    editor
        .add_vertical_link(
            VerticalLink::new(LinkKind::Stairs, Point::new(7.0, 6.0), Point::new(9.0, 6.0), 1.5)
                .with_id("stairs")
                .to_floor(upper),
        )
        .unwrap();
    editor
}

#[test]
fn test_building_a_museum() {
    let editor = museum();
    let ground = editor.current_floor();
    assert_eq!(ground.rooms.len(), 1);
    assert_eq!(ground.walls[0].room_id, Some("gallery".into()));
    assert_eq!(ground.doors[0].wall_id, Some("partition".into()));
    assert_eq!(editor.floors().len(), 2);
    assert_eq!(editor.floors()[1].vertical_links.len(), 1);
    // initial state plus six commits
    assert_eq!(editor.history().len(), 7);
    assert_eq!(editor.undo_description(), Some("Add stairs"));
}

#[test]
fn test_undo_everything_then_redo_everything() {
    let mut editor = museum();
    let finished = editor.snapshot();
    while editor.undo().unwrap() {}
    assert!(editor.current_floor().is_empty());
    assert_eq!(editor.floors().len(), 1);

    while editor.redo().unwrap() {}
    assert_eq!(editor.snapshot().floors, finished.floors);
}

#[test]
fn test_deleting_gallery_cascades_and_unlinks() {
    let mut editor = museum();
    let result = editor.delete_element(&"gallery".into(), ElementType::Room).unwrap();
    assert!(result.was_removed(&"partition".into()));
    assert!(result.was_removed(&"door".into()));
    assert!(result.was_removed(&"portrait".into()));
    assert!(result.was_removed(&"stairs".into()));
    assert_eq!(result.unlinked.len(), 1);

    let upper_link = &editor.floors()[1].vertical_links[0];
    assert!(upper_link.to_floor_id.is_none());

    editor.undo().unwrap();
    assert_eq!(editor.current_floor().element_count(), 5);
    assert!(editor.floors()[1].vertical_links[0].to_floor_id.is_some());
}

#[test]
fn test_invalid_artwork_rejected_with_verdict() {
    let mut editor = museum();
    let err = editor
        .add_artwork(Artwork::new("Outside", Point::new(20.0, 20.0), [1.0, 1.0]))
        .unwrap_err();
    let verdict = err.validation().unwrap();
    assert_eq!(verdict.code, ValidationCode::ArtworkOutsideRoom);
    assert!(!verdict.suggestions.is_empty());
}

#[test]
fn test_bounded_history_through_the_store() {
    let config = EditorConfig {
        history: HistorySettings { max_size: 3 },
        ..Default::default()
    };
    let mut editor = EditorState::new(config);
    for i in 0..6 {
        let x = 5.0 * i as f64;
        editor
            .add_room(Room::rectangle("Room", Point::new(x, 0.0), Point::new(x + 4.0, 4.0)))
            .unwrap();
    }
    assert_eq!(editor.history().len(), 3);
    assert!(editor.undo().unwrap());
    assert!(editor.undo().unwrap());
    assert!(!editor.undo().unwrap());
    assert_eq!(editor.current_floor().rooms.len(), 4);
}

#[test]
fn test_live_drag_commits_once() {
    let mut editor = museum();
    let entries = editor.history().len();
    editor.begin_gesture().unwrap();
    for step in 1..=5 {
        let mut floors = editor.floors().to_vec();
        let art = floors[0].artworks.iter_mut().find(|a| a.id.as_str() == "portrait").unwrap();
        art.position = Point::new(1.0 + step as f64 / 5.0, 1.0);
        editor.update_state(StateUpdate::new().floors(floors), false).unwrap();
        assert_eq!(editor.history().len(), entries);
    }
    assert!(matches!(editor.add_room(Room::rectangle("X", Point::new(20.0, 0.0), Point::new(24.0, 4.0))), Err(EditorError::GestureActive)));
    editor.end_gesture("Move artwork").unwrap();
    assert_eq!(editor.history().len(), entries + 1);
    assert_eq!(
        editor.current_floor().artwork(&"portrait".into()).unwrap().position,
        Point::new(2.0, 1.0)
    );
}

#[test]
fn test_document_round_trip_through_json() {
    let editor = museum();
    let json = editor.to_document().to_json().unwrap();
    let document = PlanDocument::from_json(&json).unwrap();
    let restored = EditorState::from_document(document, EditorConfig::default()).unwrap();
    assert_eq!(restored.floors(), editor.floors());
    assert_eq!(restored.current_floor_id(), editor.current_floor_id());
    assert!(!restored.history().can_undo());
}

#[test]
fn test_strict_mode_refuses_warnings() {
    let mut editor = museum();
    editor
        .add_room(Room::rectangle("Annex", Point::new(12.0, 0.0), Point::new(16.0, 4.0)).with_id("annex"))
        .unwrap();
    // inside the gallery but declared for the annex
    let misplaced = || {
        Wall::new(Point::new(1.0, 6.5), Point::new(3.0, 6.5), 0.2).with_room("annex")
    };

    editor.set_strict_mode(true);
    let err = editor.add_wall(misplaced().with_id("strict")).unwrap_err();
    assert_eq!(err.validation().map(|r| r.code), Some(ValidationCode::WallRoomMismatch));

    editor.set_strict_mode(false);
    let result = editor.add_wall(misplaced().with_id("lenient")).unwrap();
    assert_eq!(result.code, ValidationCode::WallRoomMismatch);
    assert!(editor.current_floor().wall(&"lenient".into()).is_some());
}

#[test]
fn test_clear_history_keeps_state() {
    let mut editor = museum();
    editor.begin_gesture().unwrap();
    assert!(editor.is_gesture_active());
    assert_eq!(editor.clear_history(), Err(EditorError::GestureActive));
    editor.cancel_gesture().unwrap();

    editor.clear_history().unwrap();
    assert!(!editor.can_undo());
    assert_eq!(editor.current_floor().rooms.len(), 1);
}
