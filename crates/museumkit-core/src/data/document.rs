use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ElementId, ElementType, Floor};
use crate::error::{InvariantViolation, Result};

/// The floors collection exchanged with the host
///
/// The engine does not own a file format; this is the plain serde view of
/// the model that hosts hand in and take back out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    pub floors: Vec<Floor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_floor_id: Option<ElementId>,
}

impl PlanDocument {
    pub fn new(floors: Vec<Floor>) -> Self {
        Self {
            floors,
            current_floor_id: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn floor(&self, id: &ElementId) -> Option<&Floor> {
        self.floors.iter().find(|f| &f.id == id)
    }

    /// Check every floor plus the cross-floor references
    pub fn check_integrity(&self) -> std::result::Result<(), InvariantViolation> {
        check_floors(&self.floors)?;
        if let Some(current) = &self.current_floor_id {
            if self.floor(current).is_none() {
                return Err(InvariantViolation::DanglingCurrentFloor {
                    floor_id: current.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Integrity of a floors collection: unique floor ids, per-floor
/// integrity, element ids unique across the whole building and vertical
/// link targets that resolve
pub fn check_floors(floors: &[Floor]) -> std::result::Result<(), InvariantViolation> {
    let mut seen = HashSet::new();
    let mut elements = HashSet::new();
    for floor in floors {
        if !seen.insert(&floor.id) {
            return Err(InvariantViolation::DuplicateId {
                id: floor.id.to_string(),
            });
        }
        floor.check_integrity()?;
        if let Some((id, _)) = floor.element_ids().find(|(id, _)| !elements.insert(*id)) {
            return Err(InvariantViolation::DuplicateId { id: id.to_string() });
        }
    }

    for floor in floors {
        for link in &floor.vertical_links {
            if let Some(target) = &link.to_floor_id {
                if !seen.contains(target) {
                    return Err(InvariantViolation::DanglingReference {
                        floor_id: floor.id.to_string(),
                        owner: link.id.to_string(),
                        element_type: ElementType::Floor,
                        id: target.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
