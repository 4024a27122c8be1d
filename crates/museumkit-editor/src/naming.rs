//! Default names for floors and rooms.
//!
//! Floors are named from their level: level 0 is the ground floor, levels
//! below it are basements and levels above it are numbered floors.

use museumkit_core::{Floor, LinkKind};

pub fn floor_name(level: i32) -> String {
    match level {
        0 => "Ground floor".to_string(),
        l if l < 0 => format!("Basement {}", -l),
        l => format!("Floor {}", l),
    }
}

/// Compact label for level pickers ("GF", "B1", "F2")
pub fn floor_short_name(level: i32) -> String {
    match level {
        0 => "GF".to_string(),
        l if l < 0 => format!("B{}", -l),
        l => format!("F{}", l),
    }
}

/// Letter name for the `index`-th room of a floor, wrapping after Z
pub fn room_name(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("Room {}", letter)
}

/// First room name not already used on `floor`
pub fn next_room_name(floor: &Floor) -> String {
    (0..=floor.rooms.len())
        .map(room_name)
        .find(|name| floor.rooms.iter().all(|r| &r.name != name))
        .unwrap_or_else(|| room_name(floor.rooms.len()))
}

/// "Stairs GF-F1" style label for a link between two levels
pub fn vertical_link_name(kind: LinkKind, from_level: i32, to_level: i32) -> String {
    let (low, high) = (from_level.min(to_level), from_level.max(to_level));
    let kind = match kind {
        LinkKind::Stairs => "Stairs",
        LinkKind::Elevator => "Elevator",
    };
    format!("{} {}-{}", kind, floor_short_name(low), floor_short_name(high))
}

/// Copy of `floors` with every floor renamed after its level
pub fn rename_floors(floors: &[Floor]) -> Vec<Floor> {
    floors
        .iter()
        .map(|floor| Floor {
            name: floor_name(floor.level),
            ..floor.clone()
        })
        .collect()
}
