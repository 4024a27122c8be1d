use museumkit_core::{ElementId, Floor};
use museumkit_editor::history::INITIAL_STATE_DESCRIPTION;
use museumkit_editor::{History, Snapshot};
use proptest::prelude::*;

fn snapshot(n: usize) -> Snapshot {
    let floor = Floor::new(format!("Level {}", n), n as i32).with_id(format!("f{}", n));
    Snapshot {
        current_floor_id: Some(ElementId::new(format!("f{}", n))),
        floors: vec![floor],
        ..Default::default()
    }
}

/// History after committing states 1..=steps on top of state 0
fn history_with(max_size: usize, steps: usize) -> History {
    let mut history = History::new(max_size);
    for n in 1..=steps {
        history.add(&snapshot(n - 1), snapshot(n), format!("step {}", n));
    }
    history
}

#[test]
fn test_first_commit_keeps_initial_state() {
    let history = history_with(10, 1);
    let labels: Vec<_> = history.entries().map(|e| e.description.as_str()).collect();
    assert_eq!(labels, vec![INITIAL_STATE_DESCRIPTION, "step 1"]);
    assert_eq!(history.undo_description(), Some("step 1"));
    assert_eq!(history.redo_description(), None);
}

#[test]
fn test_boundaries_are_no_ops() {
    let mut history = History::new(5);
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());

    let mut history = history_with(5, 2);
    assert!(history.redo().is_none());
    assert_eq!(history.undo(), Some(snapshot(1)));
    assert_eq!(history.undo(), Some(snapshot(0)));
    assert!(history.undo().is_none());
    assert_eq!(history.index(), 0);
}

#[test]
fn test_minimum_capacity() {
    let history = history_with(0, 5);
    assert_eq!(history.max_size(), 2);
    assert_eq!(history.len(), 2);
    assert!(history.can_undo());
}

proptest! {
    #[test]
    fn prop_cap_is_never_exceeded(max_size in 2usize..12, steps in 0usize..40) {
        let history = history_with(max_size, steps);
        prop_assert!(history.len() <= max_size);
        prop_assert!(history.check_cursor().is_ok());

        // eviction drops the oldest entries first
        if steps > 0 {
            let labels: Vec<String> = history.entries().map(|e| e.description.clone()).collect();
            let newest = format!("step {}", steps);
            prop_assert_eq!(labels.last(), Some(&newest));
            if steps + 1 > max_size {
                let expected: Vec<String> = (steps + 1 - history.len()..=steps)
                    .map(|n| format!("step {}", n))
                    .collect();
                prop_assert_eq!(labels, expected);
            }
        }
    }

    #[test]
    fn prop_undo_redo_round_trip(steps in 1usize..20, back in 0usize..20) {
        let mut history = history_with(50, steps);
        for _ in 0..back.min(steps) {
            history.undo();
        }
        let current = history.current().cloned();

        if history.can_redo() {
            history.redo();
            let undone = history.undo();
            prop_assert_eq!(undone, current.clone());
        }
        if history.can_undo() {
            history.undo();
            let redone = history.redo();
            prop_assert_eq!(redone, current.clone());
        }
        prop_assert_eq!(history.current().cloned(), current);
    }
}
