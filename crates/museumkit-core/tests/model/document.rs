use museumkit_core::data::*;
use museumkit_core::InvariantViolation;

#[test]
fn test_document_from_host_json() {
    let json = r#"{
        "floors": [
            {
                "id": "f0",
                "name": "Ground",
                "rooms": [
                    { "id": "r1", "name": "Lobby", "polygon": [
                        {"x": 0, "y": 0}, {"x": 4, "y": 0}, {"x": 4, "y": 4}, {"x": 0, "y": 4}
                    ] }
                ],
                "verticalLinks": [
                    { "id": "l1", "kind": "elevator", "segment": [{"x": 1, "y": 1}, {"x": 2, "y": 1}],
                      "width": 1, "toFloorId": "f1" }
                ]
            },
            { "id": "f1", "name": "First", "level": 1 }
        ],
        "currentFloorId": "f0"
    }"#;

    let doc = PlanDocument::from_json(json).unwrap();
    assert_eq!(doc.floors.len(), 2);
    assert_eq!(doc.current_floor_id, Some(ElementId::new("f0")));

    let ground = doc.floor(&"f0".into()).unwrap();
    assert_eq!(ground.rooms[0].polygon.len(), 4);
    assert_eq!(ground.vertical_links[0].kind, LinkKind::Elevator);
    assert_eq!(ground.vertical_links[0].direction, LinkDirection::Both);
    assert!(doc.check_integrity().is_ok());
}

#[test]
fn test_duplicate_floor_ids_rejected() {
    let doc = PlanDocument::new(vec![
        Floor::new("A", 0).with_id("f"),
        Floor::new("B", 1).with_id("f"),
    ]);
    assert_eq!(
        doc.check_integrity(),
        Err(InvariantViolation::DuplicateId { id: "f".to_string() })
    );
}

#[test]
fn test_malformed_json_is_an_error() {
    let err = PlanDocument::from_json("{ not json").unwrap_err();
    assert!(err.to_string().starts_with("Plan document error"));
}
