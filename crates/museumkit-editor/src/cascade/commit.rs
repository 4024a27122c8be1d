use std::collections::{BTreeMap, HashSet};

use museumkit_core::{ElementId, ElementType, Floor};

use super::{DeletionPlan, DeletionResult, OrphanedElement};

fn parent_exists(floors: &[Floor], floor_id: &ElementId, parent: &ElementId, parent_type: ElementType) -> bool {
    match parent_type {
        ElementType::Floor => floors.iter().any(|f| &f.id == parent),
        _ => floors
            .iter()
            .find(|f| &f.id == floor_id)
            .is_some_and(|f| f.contains(parent, parent_type)),
    }
}

/// Remove one element from its floor; `false` when it was not there
fn remove_element(floor: &mut Floor, id: &ElementId, element_type: ElementType) -> bool {
    let before = floor.element_count();
    match element_type {
        ElementType::Room => floor.rooms.retain(|r| &r.id != id),
        ElementType::Wall => floor.walls.retain(|w| &w.id != id),
        ElementType::Door => floor.doors.retain(|d| &d.id != id),
        ElementType::Artwork => floor.artworks.retain(|a| &a.id != id),
        ElementType::VerticalLink => floor.vertical_links.retain(|l| &l.id != id),
        ElementType::Floor => {}
    }
    floor.element_count() < before
}

/// Clear weak references that no longer resolve after removal
fn clear_dangling(floors: &mut [Floor], orphaned: &mut Vec<OrphanedElement>) {
    let floor_ids: HashSet<ElementId> = floors.iter().map(|f| f.id.clone()).collect();
    for floor in floors.iter_mut() {
        let rooms: HashSet<ElementId> = floor.rooms.iter().map(|r| r.id.clone()).collect();
        let walls: HashSet<ElementId> = floor.walls.iter().map(|w| w.id.clone()).collect();

        for wall in &mut floor.walls {
            if wall.room_id.as_ref().is_some_and(|r| !rooms.contains(r)) {
                wall.room_id = None;
                orphaned.push(OrphanedElement {
                    id: wall.id.clone(),
                    element_type: ElementType::Wall,
                    reason: "room reference cleared".into(),
                });
            }
        }
        for door in &mut floor.doors {
            let mut cleared = false;
            for slot in [&mut door.room_a, &mut door.room_b] {
                if slot.as_ref().is_some_and(|r| !rooms.contains(r)) {
                    *slot = None;
                    cleared = true;
                }
            }
            if door.wall_id.as_ref().is_some_and(|w| !walls.contains(w)) {
                door.wall_id = None;
                cleared = true;
            }
            if cleared {
                orphaned.push(OrphanedElement {
                    id: door.id.clone(),
                    element_type: ElementType::Door,
                    reason: "dangling room or wall reference cleared".into(),
                });
            }
        }
        for link in &mut floor.vertical_links {
            if link.to_floor_id.as_ref().is_some_and(|f| !floor_ids.contains(f)) {
                link.to_floor_id = None;
                orphaned.push(OrphanedElement {
                    id: link.id.clone(),
                    element_type: ElementType::VerticalLink,
                    reason: "target floor reference cleared".into(),
                });
            }
        }
    }
}

/// Apply `plan` to `floors` and return the resulting floors.
///
/// Removal follows the plan's priority order. Problems with individual
/// members (already gone, parent missing) are reported in
/// `orphaned_elements` and never abort the rest of the deletion.
pub fn commit_deletion(plan: &DeletionPlan, floors: &[Floor]) -> DeletionResult {
    let mut next: Vec<Floor> = floors.to_vec();
    let mut removed: BTreeMap<ElementType, Vec<ElementId>> = BTreeMap::new();
    let mut orphaned_elements = Vec::new();

    let parents: BTreeMap<&ElementId, (&ElementId, ElementType)> = plan
        .cascade
        .iter()
        .map(|m| (&m.id, (&m.depends_on, m.depends_on_type)))
        .collect();

    for (floor_id, id, element_type, _) in plan.removal_order() {
        if let Some((parent, parent_type)) = parents.get(id) {
            if !parent_exists(&next, floor_id, parent, *parent_type) {
                tracing::warn!(%id, %parent, "parent already missing during cascade");
                orphaned_elements.push(OrphanedElement {
                    id: id.clone(),
                    element_type,
                    reason: format!("expected parent {} {} was already missing", parent_type, parent),
                });
            }
        }

        let gone = if element_type == ElementType::Floor {
            let before = next.len();
            next.retain(|f| &f.id != id);
            next.len() < before
        } else {
            next.iter_mut()
                .find(|f| &f.id == floor_id)
                .is_some_and(|floor| remove_element(floor, id, element_type))
        };

        if gone {
            removed.entry(element_type).or_default().push(id.clone());
        } else {
            tracing::warn!(%id, %element_type, "element missing during cascade");
            orphaned_elements.push(OrphanedElement {
                id: id.clone(),
                element_type,
                reason: format!("{} was not found on floor {}", element_type, floor_id),
            });
        }
    }

    let mut unlinked = Vec::new();
    for orphan in &plan.orphaned_links {
        let link = next
            .iter_mut()
            .find(|f| f.id == orphan.floor_id)
            .and_then(|f| f.vertical_links.iter_mut().find(|l| l.id == orphan.link_id));
        match link {
            Some(link) => {
                link.to_floor_id = None;
                tracing::warn!(link = %orphan.link_id, reason = %orphan.reason, "vertical link unlinked");
                unlinked.push(orphan.link_id.clone());
            }
            None => orphaned_elements.push(OrphanedElement {
                id: orphan.link_id.clone(),
                element_type: ElementType::VerticalLink,
                reason: "link to unlink was not found".into(),
            }),
        }
    }

    clear_dangling(&mut next, &mut orphaned_elements);

    let result = DeletionResult {
        floors: next,
        removed,
        orphaned_elements,
        unlinked,
    };
    tracing::info!(
        target_id = %plan.target.id,
        removed = result.removed_count(),
        unlinked = result.unlinked.len(),
        orphaned = result.orphaned_elements.len(),
        "deletion committed"
    );
    result
}
