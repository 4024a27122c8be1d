use std::collections::BTreeSet;

use museumkit_core::{ElementId, Floor, Point, VerticalLink};

use super::{ValidationCode, ValidationContext, ValidationResult};
use crate::geometry::{distance, polygons_overlap, EPSILON};

fn dot(a: Point, b: Point) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Rebuild a link after dragging one footprint corner.
///
/// The diagonally opposite corner stays put and the rectangle keeps the
/// orientation of the original segment. Returns `None` for an invalid
/// corner index or when the result would have no area.
pub fn move_link_corner(link: &VerticalLink, corner_index: usize, target: Point) -> Option<VerticalLink> {
    if corner_index > 3 {
        return None;
    }
    let [a, b] = link.segment;
    let len = distance(a, b);
    if len < EPSILON {
        return None;
    }
    let u = Point::new((b.x - a.x) / len, (b.y - a.y) / len);
    let n = link.normal();
    let fixed = link.corners()[(corner_index + 2) % 4];

    let (fu, fn_) = (dot(fixed, u), dot(fixed, n));
    let (tu, tn) = (dot(target, u), dot(target, n));
    let (lo_u, hi_u) = (fu.min(tu), fu.max(tu));
    let (lo_n, hi_n) = (fn_.min(tn), fn_.max(tn));
    if hi_u - lo_u < EPSILON || hi_n - lo_n < EPSILON {
        return None;
    }

    let at = |su: f64, sn: f64| Point::new(u.x * su + n.x * sn, u.y * su + n.y * sn);
    let mut moved = link.clone();
    moved.segment = [at(lo_u, lo_n), at(hi_u, lo_n)];
    moved.width = hi_n - lo_n;
    Some(moved)
}

/// Degenerate footprint or side lengths out of bounds
fn check_shape(link: &VerticalLink, ctx: &ValidationContext<'_>) -> Option<ValidationResult> {
    let length = distance(link.segment[0], link.segment[1]);
    if length < EPSILON || link.width < EPSILON {
        return Some(ValidationResult::error(
            ValidationCode::LinkDegenerate,
            "Vertical link footprint has no area",
        ));
    }

    let constraints = &ctx.config.constraints;
    let (length_m, width_m) = (ctx.to_meters(length), ctx.to_meters(link.width));
    let in_range = |side: f64| side >= constraints.min_link_width && side <= constraints.max_link_width;
    if !in_range(length_m) || !in_range(width_m) {
        return Some(ValidationResult::error(
            ValidationCode::LinkInvalidSize,
            format!(
                "Vertical link {:.2} x {:.2} m must measure between {:.2} and {:.2} m per side",
                length_m, width_m, constraints.min_link_width, constraints.max_link_width
            ),
        ));
    }
    None
}

/// Links on `floor` outside the group of `link` whose footprint overlaps it
fn colliding_links(link: &VerticalLink, floor: &Floor, ctx: &ValidationContext<'_>) -> Vec<ElementId> {
    let footprint = link.corners();
    floor
        .vertical_links
        .iter()
        .filter(|other| !ctx.skips(&other.id, &link.id) && !other.is_linked_with(link))
        .filter(|other| {
            polygons_overlap(&footprint, &other.corners(), ctx.config.constraints.attachment_tolerance)
        })
        .map(|other| other.id.clone())
        .collect()
}

fn overlapped_rooms(footprint: &[Point], floor: &Floor, tolerance: f64) -> BTreeSet<ElementId> {
    floor
        .rooms
        .iter()
        .filter(|room| polygons_overlap(footprint, &room.polygon, tolerance))
        .map(|room| room.id.clone())
        .collect()
}

/// The current floor plus every floor the link reaches or has a copy on
pub(crate) fn connected_floors<'a>(link: &VerticalLink, ctx: &ValidationContext<'a>) -> Vec<&'a Floor> {
    let mut floors = vec![ctx.floor];
    for floor in ctx.floors {
        if floor.id == ctx.floor.id {
            continue;
        }
        let reached = link.to_floor_id.as_ref() == Some(&floor.id);
        let holds_copy = floor.vertical_links.iter().any(|l| l.is_linked_with(link));
        if reached || holds_copy {
            floors.push(floor);
        }
    }
    floors
}

/// Validate a newly placed vertical link.
pub fn validate_vertical_link_placement(link: &VerticalLink, ctx: &ValidationContext<'_>) -> ValidationResult {
    if let Some(rejected) = check_shape(link, ctx) {
        return rejected;
    }

    let target = link
        .to_floor_id
        .as_ref()
        .filter(|id| **id != ctx.floor.id)
        .and_then(|id| ctx.floors.iter().find(|f| &f.id == id));
    let Some(target) = target else {
        return ValidationResult::error(
            ValidationCode::LinkTargetFloorMissing,
            "Vertical link must connect to another existing floor",
        )
        .with_suggestions(["Pick a target floor"]);
    };

    let mut colliding = colliding_links(link, ctx.floor, ctx);
    colliding.extend(colliding_links(link, target, ctx));
    if !colliding.is_empty() {
        return ValidationResult::error(
            ValidationCode::LinkCollision,
            format!("Vertical link collides with {} other link(s)", colliding.len()),
        )
        .with_affected(colliding);
    }

    ValidationResult::ok(
        ValidationCode::LinkValid,
        format!("{} to {} is valid", link.kind, target.name),
    )
}

/// Rooms the new footprint overlaps beyond `previously`, then collisions
/// with links of other groups, on each of `floors`
fn check_new_footprint<F>(
    moved: &VerticalLink,
    floors: &[&Floor],
    previously: F,
    action: &str,
    ctx: &ValidationContext<'_>,
) -> Option<ValidationResult>
where
    F: Fn(&Floor) -> BTreeSet<ElementId>,
{
    let tolerance = ctx.config.constraints.room_overlap_tolerance;
    let after = moved.corners();
    let mut new_rooms = Vec::new();
    for floor in floors {
        let before = previously(floor);
        new_rooms.extend(
            overlapped_rooms(&after, floor, tolerance)
                .into_iter()
                .filter(|id| !before.contains(id)),
        );
    }
    if !new_rooms.is_empty() {
        return Some(
            ValidationResult::error(
                ValidationCode::LinkNewRoomOverlap,
                format!("{} link would overlap {} more room(s)", action, new_rooms.len()),
            )
            .with_affected(new_rooms),
        );
    }

    let colliding: Vec<ElementId> = floors
        .iter()
        .flat_map(|floor| colliding_links(moved, floor, ctx))
        .collect();
    if !colliding.is_empty() {
        return Some(
            ValidationResult::error(
                ValidationCode::LinkCollision,
                format!("{} link collides with {} other link(s)", action, colliding.len()),
            )
            .with_affected(colliding),
        );
    }
    None
}

/// Validate a link carried along by a room move.
///
/// `ctx` describes the floors after the move and `previous` the floors
/// before it. A room counts as newly overlapped when the link did not
/// overlap it before the move.
pub fn validate_vertical_link_translation(
    original: &VerticalLink,
    moved: &VerticalLink,
    previous: &[Floor],
    ctx: &ValidationContext<'_>,
) -> ValidationResult {
    let tolerance = ctx.config.constraints.room_overlap_tolerance;
    let before = original.corners();
    let floors = connected_floors(moved, ctx);
    let previously = |floor: &Floor| {
        previous
            .iter()
            .find(|f| f.id == floor.id)
            .map_or_else(BTreeSet::new, |f| overlapped_rooms(&before, f, tolerance))
    };
    if let Some(rejected) = check_new_footprint(moved, &floors, previously, "Moved", ctx) {
        return rejected;
    }
    ValidationResult::ok(ValidationCode::LinkValid, "Vertical link move is valid")
}

/// Validate dragging corner `corner_index` of `link` to `target`.
///
/// The resized footprint is checked on the current floor and on every
/// connected floor. Rooms the link already overlapped are tolerated; any
/// additional room is rejected.
pub fn validate_vertical_link_corner_placement(
    link: &VerticalLink,
    corner_index: usize,
    target: Point,
    ctx: &ValidationContext<'_>,
) -> ValidationResult {
    let Some(moved) = move_link_corner(link, corner_index, target) else {
        return ValidationResult::error(
            ValidationCode::LinkDegenerate,
            "Corner move would collapse the vertical link",
        );
    };
    if let Some(rejected) = check_shape(&moved, ctx) {
        return rejected;
    }

    let tolerance = ctx.config.constraints.room_overlap_tolerance;
    let before = link.corners();
    let floors = connected_floors(link, ctx);
    let previously = |floor: &Floor| overlapped_rooms(&before, floor, tolerance);
    if let Some(rejected) = check_new_footprint(&moved, &floors, previously, "Resized", ctx) {
        return rejected;
    }

    ValidationResult::ok(ValidationCode::LinkValid, "Vertical link resize is valid")
}
