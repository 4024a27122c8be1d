use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Element identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of plan element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Floor,
    Room,
    Wall,
    Door,
    Artwork,
    VerticalLink,
}

impl ElementType {
    /// All element kinds that live on a floor
    pub const FLOOR_CHILDREN: [ElementType; 5] = [
        ElementType::Room,
        ElementType::Wall,
        ElementType::Door,
        ElementType::Artwork,
        ElementType::VerticalLink,
    ];
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floor => write!(f, "floor"),
            Self::Room => write!(f, "room"),
            Self::Wall => write!(f, "wall"),
            Self::Door => write!(f, "door"),
            Self::Artwork => write!(f, "artwork"),
            Self::VerticalLink => write!(f, "vertical link"),
        }
    }
}

impl std::str::FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "floor" => Ok(Self::Floor),
            "room" => Ok(Self::Room),
            "wall" => Ok(Self::Wall),
            "door" => Ok(Self::Door),
            "artwork" => Ok(Self::Artwork),
            "verticallink" | "link" | "stairs" | "elevator" => Ok(Self::VerticalLink),
            _ => Err(format!("Unknown element type: {}", s)),
        }
    }
}
