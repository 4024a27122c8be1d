//! Cascade deletion through the store

use museumkit_core::{ElementId, ElementType};

use super::{EditorState, StateUpdate};
use crate::cascade::{analyze_deletion_plan_with, commit_deletion, DeletionPlan, DeletionResult};
use crate::error::{EditorError, EditorResult};

impl EditorState {
    /// Compute what deleting `id` would remove, without touching the state
    pub fn preview_deletion(&self, id: &ElementId, element_type: ElementType) -> EditorResult<DeletionPlan> {
        Ok(analyze_deletion_plan_with(
            id,
            element_type,
            self.floors(),
            &self.config.constraints,
        )?)
    }

    /// Delete an element and everything that depends on it as one
    /// undoable step.
    ///
    /// The last remaining floor cannot be deleted. When the current floor
    /// goes away the editor moves to the nearest remaining level.
    pub fn delete_element(&mut self, id: &ElementId, element_type: ElementType) -> EditorResult<DeletionResult> {
        self.ensure_idle()?;
        if element_type == ElementType::Floor && self.floors().len() == 1 {
            return Err(EditorError::LastFloor { floor_id: id.clone() });
        }

        let plan = self.preview_deletion(id, element_type)?;
        for warning in &plan.critical_warnings {
            tracing::warn!(%id, %warning, "critical deletion warning");
        }
        let result = commit_deletion(&plan, self.floors());

        let mut update = StateUpdate::new().floors(result.floors.clone());
        if !result.floors.iter().any(|f| &f.id == self.current_floor_id()) {
            let level = self.current_floor().level;
            if let Some(next) = result.floors.iter().min_by_key(|f| (f.level - level).abs()) {
                update = update.current_floor(next.id.clone());
            }
        }
        let description = match element_type {
            ElementType::Floor => format!(
                "Delete floor {}",
                self.floor(id).map_or(id.as_str(), |f| f.name.as_str())
            ),
            other => format!("Delete {}", other),
        };
        self.update_state(update.describe(description), true)?;
        Ok(result)
    }

    /// Delete every selected element on the current floor as one step
    pub fn delete_selected(&mut self) -> EditorResult<usize> {
        self.ensure_idle()?;
        let targets: Vec<_> = self.selection().iter().cloned().collect();
        if targets.is_empty() {
            return Ok(0);
        }

        let mut floors = self.floors().to_vec();
        let mut removed = 0;
        for target in &targets {
            // an earlier cascade may already have taken this one
            if !floors
                .iter()
                .any(|f| f.contains(&target.id, target.element_type))
            {
                continue;
            }
            let plan = analyze_deletion_plan_with(&target.id, target.element_type, &floors, &self.config.constraints)?;
            let result = commit_deletion(&plan, &floors);
            removed += result.removed_count();
            floors = result.floors;
        }

        self.update_state(
            StateUpdate::new()
                .floors(floors)
                .describe(format!("Delete {} selected", targets.len())),
            true,
        )?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::editor_state::{EditorState, StateUpdate};
    use crate::error::EditorError;
    use museumkit_core::{Artwork, ElementType, Floor, LinkKind, Point, Room, VerticalLink, Wall};

    fn editor() -> EditorState {
        let mut ground = Floor::new("Ground", 0).with_id("f0");
        ground
            .rooms
            .push(Room::rectangle("Hall", Point::new(0.0, 0.0), Point::new(8.0, 8.0)).with_id("r"));
        ground
            .walls
            .push(Wall::new(Point::new(4.0, 0.0), Point::new(4.0, 6.0), 0.2).with_id("w").with_room("r"));
        ground
            .artworks
            .push(Artwork::new("Vase", Point::new(1.0, 1.0), [1.0, 1.0]).with_id("a"));
        ground.vertical_links.push(
            VerticalLink::new(LinkKind::Stairs, Point::new(6.0, 6.0), Point::new(7.0, 6.0), 1.0)
                .with_id("s")
                .to_floor("f1"),
        );
        let mut first = Floor::new("First", 1).with_id("f1");
        first.vertical_links.push(
            VerticalLink::new(LinkKind::Stairs, Point::new(6.0, 6.0), Point::new(7.0, 6.0), 1.0)
                .with_id("s1")
                .with_master("s")
                .to_floor("f0"),
        );

        let mut editor = EditorState::default();
        editor
            .update_state(
                StateUpdate::new().floors(vec![ground, first]).current_floor("f0".into()),
                false,
            )
            .unwrap();
        editor
    }

    #[test]
    fn test_delete_room_is_one_undo_step() {
        let mut editor = editor();
        let before = editor.snapshot();
        let result = editor.delete_element(&"r".into(), ElementType::Room).unwrap();
        assert_eq!(result.removed_count(), 4);
        assert!(editor.current_floor().is_empty());
        assert!(editor.floors()[1].vertical_links[0].to_floor_id.is_none());

        assert!(editor.undo().unwrap());
        assert_eq!(editor.snapshot().floors, before.floors);
    }

    #[test]
    fn test_delete_current_floor_moves_to_neighbour() {
        let mut editor = editor();
        editor.delete_element(&"f0".into(), ElementType::Floor).unwrap();
        assert_eq!(editor.current_floor_id().as_str(), "f1");
        assert_eq!(editor.undo_description(), Some("Delete floor Ground"));

        let err = editor
            .delete_element(&"f1".into(), ElementType::Floor)
            .unwrap_err();
        assert!(matches!(err, EditorError::LastFloor { .. }));
    }

    #[test]
    fn test_preview_leaves_state() {
        let editor = editor();
        let plan = editor.preview_deletion(&"w".into(), ElementType::Wall).unwrap();
        assert!(plan.removes(&"w".into()));
        assert_eq!(editor.current_floor().walls.len(), 1);
        assert!(editor.preview_deletion(&"nope".into(), ElementType::Wall).is_err());
    }

    #[test]
    fn test_delete_selected_skips_cascaded() {
        let mut editor = editor();
        editor.select(&"a".into());
        editor.toggle_selection(&"r".into());
        let removed = editor.delete_selected().unwrap();
        assert_eq!(removed, 4);
        assert!(editor.current_floor().is_empty());
        assert!(editor.selection().is_empty());
    }
}
