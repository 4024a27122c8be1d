//! Structural dependency lookups used by the cascade resolver

use museumkit_core::{Artwork, Door, Floor, Room, VerticalLink, Wall};
use museumkit_settings::Constraints;

use crate::geometry::{is_point_inside_or_on, segment_lies_on};
use crate::validation::{find_door_walls, find_host_room};

/// Walls that partition `room`: declared through `room_id`, or unassigned
/// and lying inside it
pub(crate) fn room_walls<'a>(floor: &'a Floor, room: &Room, constraints: &Constraints) -> Vec<&'a Wall> {
    floor
        .walls
        .iter()
        .filter(|wall| match &wall.room_id {
            Some(room_id) => room_id == &room.id,
            None => find_host_room(wall.points(), floor, constraints.attachment_tolerance)
                .is_some_and(|host| host.id == room.id),
        })
        .collect()
}

pub(crate) fn room_doors<'a>(floor: &'a Floor, room: &Room) -> Vec<&'a Door> {
    floor
        .doors
        .iter()
        .filter(|door| door.references_room(&room.id))
        .collect()
}

pub(crate) fn room_artworks<'a>(floor: &'a Floor, room: &Room, constraints: &Constraints) -> Vec<&'a Artwork> {
    floor
        .artworks
        .iter()
        .filter(|art| is_point_inside_or_on(art.center(), &room.polygon, constraints.attachment_tolerance))
        .collect()
}

pub(crate) fn room_links<'a>(floor: &'a Floor, room: &Room, constraints: &Constraints) -> Vec<&'a VerticalLink> {
    floor
        .vertical_links
        .iter()
        .filter(|link| is_point_inside_or_on(link.center(), &room.polygon, constraints.attachment_tolerance))
        .collect()
}

/// Whether `door` is supported by `wall`
pub(crate) fn door_on_wall(floor: &Floor, door: &Door, wall: &Wall, constraints: &Constraints) -> bool {
    match &door.wall_id {
        Some(wall_id) => wall_id == &wall.id,
        None => find_door_walls(door, floor, constraints.door_snap_tolerance)
            .iter()
            .any(|w| w.id == wall.id),
    }
}

/// Whether the base segment of `link` runs along `wall`
pub(crate) fn link_on_wall(link: &VerticalLink, wall: &Wall, constraints: &Constraints) -> bool {
    let [a, b] = link.segment;
    wall.segments()
        .any(|(c, d)| segment_lies_on(a, b, c, d, constraints.attachment_tolerance))
}

pub(crate) fn wall_doors<'a>(floor: &'a Floor, wall: &Wall, constraints: &Constraints) -> Vec<&'a Door> {
    floor
        .doors
        .iter()
        .filter(|door| door_on_wall(floor, door, wall, constraints))
        .collect()
}

pub(crate) fn wall_links<'a>(floor: &'a Floor, wall: &Wall, constraints: &Constraints) -> Vec<&'a VerticalLink> {
    floor
        .vertical_links
        .iter()
        .filter(|link| link_on_wall(link, wall, constraints))
        .collect()
}
