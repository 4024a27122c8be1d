//! Cascade deletion
//!
//! Deleting an element also deletes what structurally depends on it:
//!
//! ```text
//! Floor ─┬─ Room ─┬─ Wall ─┬─ Door
//!        │        │        └─ VerticalLink
//!        │        ├─ Door
//!        │        ├─ Artwork
//!        │        └─ VerticalLink
//!        └─ (everything else on the floor)
//! ```
//!
//! [`analyze_deletion_plan`] computes the full set with a removal priority
//! per member (leaves first) without touching the model.
//! [`commit_deletion`] applies a plan and returns the new floors. Links on
//! other floors that pointed at something removed are orphaned, never
//! deleted.

mod analyze;
mod commit;
pub(crate) mod relations;

pub use analyze::{analyze_deletion_plan, analyze_deletion_plan_with};
pub use commit::commit_deletion;

use std::collections::BTreeMap;

use museumkit_core::{ElementId, ElementType, Floor};
use serde::{Deserialize, Serialize};

/// Removal priority: lower values are removed first
pub fn removal_priority(element_type: ElementType) -> u8 {
    match element_type {
        ElementType::Door | ElementType::Artwork | ElementType::VerticalLink => 1,
        ElementType::Wall => 2,
        ElementType::Room => 3,
        ElementType::Floor => 4,
    }
}

/// The element the user asked to delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionTarget {
    pub id: ElementId,
    pub element_type: ElementType,
    /// Floor holding the element (the floor itself for floor targets)
    pub floor_id: ElementId,
    pub priority: u8,
}

/// An element removed because something it depends on is removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeMember {
    pub id: ElementId,
    pub element_type: ElementType,
    pub floor_id: ElementId,
    pub reason: String,
    pub depends_on: ElementId,
    pub depends_on_type: ElementType,
    pub priority: u8,
}

/// A link on another floor that loses its counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedLink {
    pub link_id: ElementId,
    pub floor_id: ElementId,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedImpact {
    /// Target plus cascade members
    pub total_elements: usize,
    pub rooms_affected: usize,
    pub floors_affected: usize,
    pub by_type: BTreeMap<ElementType, usize>,
}

/// Everything a deletion would do, computed ahead of time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionPlan {
    pub target: DeletionTarget,
    /// Dependents, sorted by ascending priority
    pub cascade: Vec<CascadeMember>,
    pub estimated_impact: EstimatedImpact,
    pub warnings: Vec<String>,
    pub critical_warnings: Vec<String>,
    pub orphaned_links: Vec<OrphanedLink>,
}

impl DeletionPlan {
    /// Whether `id` would be removed by this plan
    pub fn removes(&self, id: &ElementId) -> bool {
        &self.target.id == id || self.cascade.iter().any(|m| &m.id == id)
    }

    pub fn has_critical_warnings(&self) -> bool {
        !self.critical_warnings.is_empty()
    }

    /// Every removal as `(floor, id, type, priority)`, leaves first
    pub fn removal_order(&self) -> Vec<(&ElementId, &ElementId, ElementType, u8)> {
        let mut order: Vec<_> = self
            .cascade
            .iter()
            .map(|m| (&m.floor_id, &m.id, m.element_type, m.priority))
            .chain(std::iter::once((
                &self.target.floor_id,
                &self.target.id,
                self.target.element_type,
                self.target.priority,
            )))
            .collect();
        order.sort_by_key(|(_, _, _, priority)| *priority);
        order
    }
}

/// An element that could not be processed cleanly during commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedElement {
    pub id: ElementId,
    pub element_type: ElementType,
    pub reason: String,
}

/// Outcome of applying a [`DeletionPlan`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionResult {
    /// The floors after removal
    pub floors: Vec<Floor>,
    pub removed: BTreeMap<ElementType, Vec<ElementId>>,
    pub orphaned_elements: Vec<OrphanedElement>,
    /// Links whose target floor was cleared
    pub unlinked: Vec<ElementId>,
}

impl DeletionResult {
    pub fn removed_count(&self) -> usize {
        self.removed.values().map(Vec::len).sum()
    }

    pub fn was_removed(&self, id: &ElementId) -> bool {
        self.removed.values().any(|ids| ids.contains(id))
    }
}
