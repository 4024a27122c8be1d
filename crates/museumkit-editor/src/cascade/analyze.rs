use std::collections::{BTreeMap, BTreeSet, HashSet};

use museumkit_core::{ElementId, ElementType, Floor, ModelError};
use museumkit_settings::Constraints;

use super::relations::{
    room_artworks, room_doors, room_links, room_walls, wall_doors, wall_links,
};
use super::{removal_priority, CascadeMember, DeletionPlan, DeletionTarget, EstimatedImpact, OrphanedLink};

/// Accumulates cascade members without duplicates
struct PlanBuilder<'a> {
    floor: &'a Floor,
    target: (ElementId, ElementType),
    members: Vec<CascadeMember>,
    seen: HashSet<ElementId>,
}

impl<'a> PlanBuilder<'a> {
    fn new(floor: &'a Floor, id: &ElementId, element_type: ElementType) -> Self {
        let mut seen = HashSet::new();
        seen.insert(id.clone());
        Self {
            floor,
            target: (id.clone(), element_type),
            members: Vec::new(),
            seen,
        }
    }

    fn includes(&self, id: &ElementId) -> bool {
        self.seen.contains(id)
    }

    fn push(
        &mut self,
        id: &ElementId,
        element_type: ElementType,
        parent: (&ElementId, ElementType),
        reason: String,
    ) -> bool {
        if !self.seen.insert(id.clone()) {
            return false;
        }
        self.members.push(CascadeMember {
            id: id.clone(),
            element_type,
            floor_id: self.floor.id.clone(),
            reason,
            depends_on: parent.0.clone(),
            depends_on_type: parent.1,
            priority: removal_priority(element_type),
        });
        true
    }

    /// Doors and links supported by `wall`
    fn add_wall_children(&mut self, wall_id: &ElementId, constraints: &Constraints) {
        let floor = self.floor;
        let Some(wall) = floor.wall(wall_id) else {
            return;
        };
        for door in wall_doors(floor, wall, constraints) {
            self.push(
                &door.id,
                ElementType::Door,
                (&wall.id, ElementType::Wall),
                format!("door sits on wall {}", wall.id),
            );
        }
        for link in wall_links(floor, wall, constraints) {
            self.push(
                &link.id,
                ElementType::VerticalLink,
                (&wall.id, ElementType::Wall),
                format!("{} is attached to wall {}", link.kind, wall.id),
            );
        }
    }

    /// Walls, doors, artworks and links belonging to `room`
    fn add_room_children(&mut self, room_id: &ElementId, constraints: &Constraints) {
        let floor = self.floor;
        let Some(room) = floor.room(room_id) else {
            return;
        };
        let parent = (&room.id, ElementType::Room);

        let walls: Vec<&ElementId> = room_walls(floor, room, constraints)
            .into_iter()
            .map(|w| &w.id)
            .collect();
        for wall_id in &walls {
            self.push(
                wall_id,
                ElementType::Wall,
                parent,
                format!("wall partitions room {}", room.name),
            );
        }
        // attachments hang off their wall so they go before it
        for wall_id in &walls {
            self.add_wall_children(wall_id, constraints);
        }

        for door in room_doors(floor, room) {
            self.push(
                &door.id,
                ElementType::Door,
                parent,
                format!("door opens into room {}", room.name),
            );
        }
        for art in room_artworks(floor, room, constraints) {
            self.push(
                &art.id,
                ElementType::Artwork,
                parent,
                format!("artwork is displayed in room {}", room.name),
            );
        }
        for link in room_links(floor, room, constraints) {
            self.push(
                &link.id,
                ElementType::VerticalLink,
                parent,
                format!("{} stands in room {}", link.kind, room.name),
            );
        }
    }

    fn add_floor_children(&mut self, constraints: &Constraints) {
        let floor = self.floor;
        let parent = (&floor.id, ElementType::Floor);
        for room in &floor.rooms {
            self.push(&room.id, ElementType::Room, parent, format!("room is on floor {}", floor.name));
        }
        for room in &floor.rooms {
            self.add_room_children(&room.id, constraints);
        }
        for wall in &floor.walls {
            if self.push(&wall.id, ElementType::Wall, parent, format!("wall is on floor {}", floor.name)) {
                self.add_wall_children(&wall.id, constraints);
            }
        }
        let leftovers = floor
            .doors
            .iter()
            .map(|d| (&d.id, ElementType::Door))
            .chain(floor.artworks.iter().map(|a| (&a.id, ElementType::Artwork)))
            .chain(floor.vertical_links.iter().map(|l| (&l.id, ElementType::VerticalLink)));
        for (id, element_type) in leftovers {
            self.push(id, element_type, parent, format!("{} is on floor {}", element_type, floor.name));
        }
    }

    fn removed_ids(&self, element_type: ElementType) -> impl Iterator<Item = &ElementId> {
        let target = (self.target.1 == element_type).then_some(&self.target.0);
        target.into_iter().chain(
            self.members
                .iter()
                .filter(move |m| m.element_type == element_type)
                .map(|m| &m.id),
        )
    }
}

fn locate<'a>(floors: &'a [Floor], id: &ElementId, element_type: ElementType) -> Result<&'a Floor, ModelError> {
    let found = match element_type {
        ElementType::Floor => floors.iter().find(|f| &f.id == id),
        _ => floors.iter().find(|f| f.contains(id, element_type)),
    };
    found.ok_or_else(|| match element_type {
        ElementType::Floor => ModelError::FloorNotFound {
            floor_id: id.to_string(),
        },
        _ => ModelError::ElementNotFound {
            element_type,
            id: id.to_string(),
        },
    })
}

/// [`analyze_deletion_plan_with`] using the default constraints
pub fn analyze_deletion_plan(
    id: &ElementId,
    element_type: ElementType,
    floors: &[Floor],
) -> Result<DeletionPlan, ModelError> {
    analyze_deletion_plan_with(id, element_type, floors, &Constraints::default())
}

/// Compute what deleting `id` would remove, without changing anything.
///
/// Fails only when the target cannot be found. Cascade members are sorted
/// by ascending priority so removing them in order never references an
/// element that is already gone.
pub fn analyze_deletion_plan_with(
    id: &ElementId,
    element_type: ElementType,
    floors: &[Floor],
    constraints: &Constraints,
) -> Result<DeletionPlan, ModelError> {
    let floor = locate(floors, id, element_type)?;
    let mut builder = PlanBuilder::new(floor, id, element_type);
    let mut warnings = Vec::new();
    let mut critical_warnings = Vec::new();

    match element_type {
        ElementType::Floor => {
            builder.add_floor_children(constraints);
            critical_warnings.push(format!(
                "Deleting floor {} removes it and all {} element(s) on it",
                floor.name,
                floor.element_count()
            ));
        }
        ElementType::Room => builder.add_room_children(id, constraints),
        ElementType::Wall => builder.add_wall_children(id, constraints),
        ElementType::Door | ElementType::Artwork | ElementType::VerticalLink => {}
    }

    for wall_id in builder.removed_ids(ElementType::Wall) {
        if let Some(wall) = floor.wall(wall_id).filter(|w| w.is_load_bearing) {
            warnings.push(format!("Wall {} is load-bearing", wall.id));
        }
    }

    for door_id in builder.removed_ids(ElementType::Door) {
        let Some(door) = floor.door(door_id) else {
            continue;
        };
        for room_id in door.room_ids().filter(|r| !builder.includes(r)) {
            let name = floor.room(room_id).map_or(room_id.as_str(), |r| r.name.as_str());
            warnings.push(format!("Room {} loses door {}", name, door.id));
        }
    }

    let removed_links: Vec<&ElementId> = builder.removed_ids(ElementType::VerticalLink).collect();
    let groups: BTreeSet<&ElementId> = removed_links
        .iter()
        .filter_map(|lid| floor.vertical_link(lid))
        .map(|l| l.group_id())
        .collect();
    let mut orphaned_links = Vec::new();
    for other in floors.iter().filter(|f| f.id != floor.id) {
        for link in &other.vertical_links {
            let reason = if element_type == ElementType::Floor && link.to_floor_id.as_ref() == Some(&floor.id) {
                format!("its target floor {} is deleted", floor.name)
            } else if groups.contains(link.group_id()) {
                format!("its counterpart on floor {} is deleted", floor.name)
            } else {
                continue;
            };
            critical_warnings.push(format!(
                "{} {} on floor {} will be unlinked: {}",
                link.kind, link.id, other.name, reason
            ));
            orphaned_links.push(OrphanedLink {
                link_id: link.id.clone(),
                floor_id: other.id.clone(),
                reason,
            });
        }
    }

    let mut cascade = builder.members;
    cascade.sort_by_key(|m| m.priority);

    let mut by_type = BTreeMap::new();
    *by_type.entry(element_type).or_insert(0) += 1;
    for member in &cascade {
        *by_type.entry(member.element_type).or_insert(0) += 1;
    }
    let mut floors_affected: BTreeSet<&ElementId> = orphaned_links.iter().map(|o| &o.floor_id).collect();
    floors_affected.insert(&floor.id);

    let estimated_impact = EstimatedImpact {
        total_elements: 1 + cascade.len(),
        rooms_affected: by_type.get(&ElementType::Room).copied().unwrap_or(0),
        floors_affected: floors_affected.len(),
        by_type,
    };

    let plan = DeletionPlan {
        target: DeletionTarget {
            id: id.clone(),
            element_type,
            floor_id: floor.id.clone(),
            priority: removal_priority(element_type),
        },
        cascade,
        estimated_impact,
        warnings,
        critical_warnings,
        orphaned_links,
    };
    tracing::debug!(
        target_id = %id,
        %element_type,
        cascade = plan.cascade.len(),
        critical = plan.critical_warnings.len(),
        "deletion plan analyzed"
    );
    Ok(plan)
}
