//! Constraint validation for plan elements.
//!
//! Validators inspect a candidate element against the floor it would live
//! on and return a [`ValidationResult`]. They never mutate anything and
//! never fail: every rejection is a value the caller can show, retry or
//! discard. Checks run in a fixed order and the first failing rule wins.
//!
//! - [`validate_room_placement`]
//! - [`validate_wall_placement`]
//! - [`validate_door_placement`]
//! - [`validate_artwork_placement`]
//! - [`validate_vertical_link_placement`] and
//!   [`validate_vertical_link_corner_placement`], plus
//!   [`validate_vertical_link_translation`] for links carried by a room move
//! - [`validate_point_addition`] / [`validate_point_removal`] for vertex edits
//! - [`validate_element`] to re-check something already placed

mod artwork;
mod door;
mod polygon_edit;
mod room;
mod vertical_link;
mod wall;

pub use artwork::{find_artwork_room, validate_artwork_placement};
pub use door::{find_door_walls, validate_door_placement};
pub use polygon_edit::{validate_point_addition, validate_point_removal};
pub use room::validate_room_placement;
pub use vertical_link::{
    move_link_corner, validate_vertical_link_corner_placement, validate_vertical_link_placement,
    validate_vertical_link_translation,
};
pub use wall::{find_host_room, validate_wall_placement};

use museumkit_core::{ElementId, ElementType, Floor};
use museumkit_settings::EditorConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a validation outcome is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cosmetic only
    Info,
    /// Commit allowed, feedback shown
    Warning,
    /// Commit blocked
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Machine-readable outcome codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    RoomValid,
    RoomInvalidShape,
    RoomDuplicatePoints,
    RoomSelfIntersecting,
    RoomTooSmall,
    RoomTooLarge,
    RoomOverlapping,

    WallValid,
    WallInvalidShape,
    WallTooShort,
    WallInvalidThickness,
    WallOutsideRoom,
    WallIntersection,
    WallRoomMismatch,

    DoorValid,
    DoorInvalidWidth,
    DoorRoomNotFound,
    DoorWallNotFound,
    DoorNotOnWall,
    DoorAmbiguousWall,

    ArtworkValid,
    ArtworkInvalidSize,
    ArtworkOutsideRoom,
    ArtworkOverlapping,

    LinkValid,
    LinkInvalidSize,
    LinkTargetFloorMissing,
    LinkCollision,
    LinkDegenerate,
    LinkNewRoomOverlap,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoomValid => "ROOM_VALID",
            Self::RoomInvalidShape => "ROOM_INVALID_SHAPE",
            Self::RoomDuplicatePoints => "ROOM_DUPLICATE_POINTS",
            Self::RoomSelfIntersecting => "ROOM_SELF_INTERSECTING",
            Self::RoomTooSmall => "ROOM_TOO_SMALL",
            Self::RoomTooLarge => "ROOM_TOO_LARGE",
            Self::RoomOverlapping => "ROOM_OVERLAPPING",
            Self::WallValid => "WALL_VALID",
            Self::WallInvalidShape => "WALL_INVALID_SHAPE",
            Self::WallTooShort => "WALL_TOO_SHORT",
            Self::WallInvalidThickness => "WALL_INVALID_THICKNESS",
            Self::WallOutsideRoom => "WALL_OUTSIDE_ROOM",
            Self::WallIntersection => "WALL_INTERSECTION",
            Self::WallRoomMismatch => "WALL_ROOM_MISMATCH",
            Self::DoorValid => "DOOR_VALID",
            Self::DoorInvalidWidth => "DOOR_INVALID_WIDTH",
            Self::DoorRoomNotFound => "DOOR_ROOM_NOT_FOUND",
            Self::DoorWallNotFound => "DOOR_WALL_NOT_FOUND",
            Self::DoorNotOnWall => "DOOR_NOT_ON_WALL",
            Self::DoorAmbiguousWall => "DOOR_AMBIGUOUS_WALL",
            Self::ArtworkValid => "ARTWORK_VALID",
            Self::ArtworkInvalidSize => "ARTWORK_INVALID_SIZE",
            Self::ArtworkOutsideRoom => "ARTWORK_OUTSIDE_ROOM",
            Self::ArtworkOverlapping => "ARTWORK_OVERLAPPING",
            Self::LinkValid => "LINK_VALID",
            Self::LinkInvalidSize => "LINK_INVALID_SIZE",
            Self::LinkTargetFloorMissing => "LINK_TARGET_FLOOR_MISSING",
            Self::LinkCollision => "LINK_COLLISION",
            Self::LinkDegenerate => "LINK_DEGENERATE",
            Self::LinkNewRoomOverlap => "LINK_NEW_ROOM_OVERLAP",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of a placement check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub severity: Severity,
    pub code: ValidationCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Other elements involved in the verdict (overlapping rooms, the
    /// resolved host wall, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_elements: Vec<ElementId>,
}

impl ValidationResult {
    /// Passing verdict with severity `info`
    pub fn ok(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            valid: true,
            severity: Severity::Info,
            code,
            message: message.into(),
            suggestions: Vec::new(),
            affected_elements: Vec::new(),
        }
    }

    /// Passing verdict that still deserves attention
    pub fn warning(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::ok(code, message)
        }
    }

    /// Blocking verdict
    pub fn error(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            severity: Severity::Error,
            ..Self::ok(code, message)
        }
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_affected<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.affected_elements = ids.into_iter().collect();
        self
    }

    /// Whether this verdict prevents a commit
    ///
    /// In strict mode warnings block as well.
    pub fn blocks_commit(&self, strict_mode: bool) -> bool {
        !self.valid || (strict_mode && self.severity == Severity::Warning)
    }
}

/// Everything a validator may look at
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Floor the element is placed on
    pub floor: &'a Floor,
    /// All floors, needed for cross-floor checks on vertical links
    pub floors: &'a [Floor],
    /// Elements to ignore, typically the ones being moved together
    pub exclude_ids: &'a [ElementId],
    pub strict_mode: bool,
    pub config: &'a EditorConfig,
}

impl<'a> ValidationContext<'a> {
    pub fn new(floor: &'a Floor, config: &'a EditorConfig) -> Self {
        Self {
            floor,
            floors: std::slice::from_ref(floor),
            exclude_ids: &[],
            strict_mode: false,
            config,
        }
    }

    pub fn with_floors(mut self, floors: &'a [Floor]) -> Self {
        self.floors = floors;
        self
    }

    pub fn excluding(mut self, ids: &'a [ElementId]) -> Self {
        self.exclude_ids = ids;
        self
    }

    pub fn strict(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    /// Whether `id` should be skipped when comparing against neighbours
    pub(crate) fn skips(&self, id: &ElementId, subject: &ElementId) -> bool {
        id == subject || self.exclude_ids.contains(id)
    }

    pub(crate) fn to_meters(&self, value: f64) -> f64 {
        museumkit_core::units::grid_to_meters(value, self.config.grid.grid_to_meters)
    }
}

/// Re-validate an element that already lives on `ctx.floor`
///
/// Returns `None` when the element is not on the floor. Floors have no
/// placement rules and always yield `None`.
pub fn validate_element(
    id: &ElementId,
    element_type: ElementType,
    ctx: &ValidationContext<'_>,
) -> Option<ValidationResult> {
    let floor = ctx.floor;
    match element_type {
        ElementType::Room => floor.room(id).map(|r| validate_room_placement(r, ctx)),
        ElementType::Wall => floor.wall(id).map(|w| validate_wall_placement(w, ctx)),
        ElementType::Door => floor.door(id).map(|d| validate_door_placement(d, ctx)),
        ElementType::Artwork => floor.artwork(id).map(|a| validate_artwork_placement(a, ctx)),
        ElementType::VerticalLink => floor
            .vertical_link(id)
            .map(|l| validate_vertical_link_placement(l, ctx)),
        ElementType::Floor => None,
    }
}
