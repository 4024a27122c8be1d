use museumkit_core::{Artwork, ElementId, Floor, Room};

use super::{ValidationCode, ValidationContext, ValidationResult};
use crate::geometry::{is_point_inside_or_on, polygon_contains_polygon, rectangles_overlap};

/// Room whose outline fully contains the artwork footprint
pub fn find_artwork_room<'a>(artwork: &Artwork, floor: &'a Floor, tolerance: f64) -> Option<&'a Room> {
    let corners = artwork.corners();
    floor
        .rooms
        .iter()
        .find(|room| polygon_contains_polygon(&room.polygon, &corners, tolerance))
}

fn same_zone(a: &Artwork, b: &Artwork) -> bool {
    matches!((&a.zone_id, &b.zone_id), (Some(x), Some(y)) if x == y)
}

pub fn validate_artwork_placement(artwork: &Artwork, ctx: &ValidationContext<'_>) -> ValidationResult {
    let constraints = &ctx.config.constraints;
    let [w, h] = artwork.size.map(|side| ctx.to_meters(side));
    let in_range = |side: f64| side >= constraints.min_artwork_size && side <= constraints.max_artwork_size;
    if !in_range(w) || !in_range(h) {
        return ValidationResult::error(
            ValidationCode::ArtworkInvalidSize,
            format!(
                "Artwork {:.2} x {:.2} m must measure between {:.2} and {:.2} m per side",
                w, h, constraints.min_artwork_size, constraints.max_artwork_size
            ),
        );
    }

    let Some(room) = find_artwork_room(artwork, ctx.floor, constraints.attachment_tolerance) else {
        return ValidationResult::error(
            ValidationCode::ArtworkOutsideRoom,
            "Artwork must lie entirely within a room",
        )
        .with_suggestions(["Move the artwork inside a room"]);
    };

    let footprint = artwork.bounds();
    let overlapping: Vec<ElementId> = ctx
        .floor
        .artworks
        .iter()
        .filter(|other| !ctx.skips(&other.id, &artwork.id))
        .filter(|other| !same_zone(artwork, other))
        .filter(|other| {
            is_point_inside_or_on(other.center(), &room.polygon, constraints.attachment_tolerance)
        })
        .filter(|other| rectangles_overlap(&footprint, &other.bounds()))
        .map(|other| other.id.clone())
        .collect();
    if !overlapping.is_empty() {
        return ValidationResult::error(
            ValidationCode::ArtworkOverlapping,
            format!("Artwork overlaps {} other artwork(s)", overlapping.len()),
        )
        .with_affected(overlapping)
        .with_suggestions(["Move the artwork", "Put both artworks in the same zone"]);
    }

    ValidationResult::ok(
        ValidationCode::ArtworkValid,
        format!("Artwork fits in room {}", room.name),
    )
    .with_affected([room.id.clone()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use museumkit_core::Point;
    use museumkit_settings::EditorConfig;

    fn floor() -> Floor {
        let mut floor = Floor::new("Ground", 0);
        floor
            .rooms
            .push(Room::rectangle("Gallery", Point::new(0.0, 0.0), Point::new(6.0, 6.0)).with_id("g"));
        floor
            .artworks
            .push(Artwork::new("Still life", Point::new(1.0, 1.0), [2.0, 2.0]).with_id("a1"));
        floor
    }

    #[test]
    fn test_artwork_in_room() {
        let config = EditorConfig::default();
        let floor = floor();
        let art = Artwork::new("Portrait", Point::new(3.0, 3.0), [2.0, 1.0]);
        let result = validate_artwork_placement(&art, &ValidationContext::new(&floor, &config));
        assert!(result.valid, "{}", result.message);
        assert_eq!(result.affected_elements, vec![ElementId::new("g")]);
    }

    #[test]
    fn test_artwork_touching_neighbour_is_fine() {
        let config = EditorConfig::default();
        let floor = floor();
        let art = Artwork::new("Portrait", Point::new(3.0, 1.0), [2.0, 2.0]);
        let result = validate_artwork_placement(&art, &ValidationContext::new(&floor, &config));
        assert!(result.valid, "{}", result.message);
    }

    #[test]
    fn test_artwork_overlap_and_zone_exemption() {
        let config = EditorConfig::default();
        let mut floor = floor();
        let art = Artwork::new("Portrait", Point::new(2.0, 2.0), [2.0, 2.0]);
        let result = validate_artwork_placement(&art, &ValidationContext::new(&floor, &config));
        assert_eq!(result.code, ValidationCode::ArtworkOverlapping);
        assert_eq!(result.affected_elements, vec![ElementId::new("a1")]);

        floor.artworks[0].zone_id = Some("triptych".into());
        let art = art.in_zone("triptych");
        let result = validate_artwork_placement(&art, &ValidationContext::new(&floor, &config));
        assert!(result.valid);
    }

    #[test]
    fn test_artwork_outside_or_crossing_room() {
        let config = EditorConfig::default();
        let floor = floor();
        let ctx = ValidationContext::new(&floor, &config);

        let outside = Artwork::new("Lost", Point::new(10.0, 10.0), [1.0, 1.0]);
        assert_eq!(validate_artwork_placement(&outside, &ctx).code, ValidationCode::ArtworkOutsideRoom);

        let crossing = Artwork::new("Edge", Point::new(5.0, 5.0), [2.0, 2.0]);
        assert_eq!(validate_artwork_placement(&crossing, &ctx).code, ValidationCode::ArtworkOutsideRoom);
    }

    #[test]
    fn test_artwork_size_limits() {
        let config = EditorConfig::default();
        let floor = floor();
        let ctx = ValidationContext::new(&floor, &config);

        // 0.1 grid units is 0.05 m
        let tiny = Artwork::new("Stamp", Point::new(4.0, 4.0), [0.1, 1.0]);
        assert_eq!(validate_artwork_placement(&tiny, &ctx).code, ValidationCode::ArtworkInvalidSize);

        let huge = Artwork::new("Mural", Point::new(0.0, 0.0), [50.0, 1.0]);
        assert_eq!(validate_artwork_placement(&huge, &ctx).code, ValidationCode::ArtworkInvalidSize);
    }
}
