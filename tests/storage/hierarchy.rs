//! Integration tests for the hierarchy index
//!
//! Tests parent/child symmetry, traversal, and cycle rejection.

use sceneindex_foundation::EntityId;
use sceneindex_storage::HierarchyIndex;

fn e(raw: u64) -> EntityId {
    EntityId::new(raw)
}

fn sorted(mut ids: Vec<EntityId>) -> Vec<EntityId> {
    ids.sort();
    ids
}

/// Builds `1 -> {2, 3}`, `2 -> {4}`, `4 -> {5}`.
fn tree() -> HierarchyIndex {
    let mut hierarchy = HierarchyIndex::new();
    hierarchy.set_parent(e(2), Some(e(1))).unwrap();
    hierarchy.set_parent(e(3), Some(e(1))).unwrap();
    hierarchy.set_parent(e(4), Some(e(2))).unwrap();
    hierarchy.set_parent(e(5), Some(e(4))).unwrap();
    hierarchy
}

// =============================================================================
// Traversal
// =============================================================================

#[test]
fn descendants_and_ancestors() {
    let hierarchy = tree();

    assert_eq!(sorted(hierarchy.get_descendants(e(1))), vec![e(2), e(3), e(4), e(5)]);
    assert_eq!(hierarchy.get_ancestors(e(5)), vec![e(4), e(2), e(1)]);
    assert!(hierarchy.get_ancestors(e(1)).is_empty());
    assert!(hierarchy.get_descendants(e(5)).is_empty());
}

#[test]
fn roots_are_filtered_from_the_supplied_universe() {
    let hierarchy = tree();
    let roots = hierarchy.get_root_entities([e(1), e(2), e(3), e(6)]);

    assert_eq!(sorted(roots), vec![e(1), e(6)]);
}

// =============================================================================
// Reparenting and Cycles
// =============================================================================

#[test]
fn reparent_moves_child_between_sets() {
    let mut hierarchy = tree();
    hierarchy.set_parent(e(4), Some(e(3))).unwrap();

    assert!(hierarchy.get_children(e(2)).is_empty());
    assert_eq!(hierarchy.get_children(e(3)), vec![e(4)]);
    assert!(hierarchy.symmetry_violations().is_empty());
}

#[test]
fn cycle_is_rejected_and_state_kept() {
    let mut hierarchy = tree();

    let err = hierarchy.set_parent(e(1), Some(e(5))).unwrap_err();

    assert!(err.is_cycle());
    assert_eq!(hierarchy.get_parent(e(1)), None);
    assert_eq!(hierarchy.edge_count(), 4);
}

#[test]
fn self_parent_is_a_cycle() {
    let mut hierarchy = HierarchyIndex::new();
    assert!(hierarchy.would_create_cycle(e(1), e(1)));
    assert!(hierarchy.set_parent(e(1), Some(e(1))).is_err());
}

#[test]
fn remove_entity_orphans_children() {
    let mut hierarchy = tree();
    hierarchy.remove_entity(e(2));

    assert_eq!(hierarchy.get_parent(e(4)), None);
    assert_eq!(hierarchy.get_children(e(1)), vec![e(3)]);
    assert_eq!(hierarchy.get_children(e(4)), vec![e(5)]);
    assert!(hierarchy.symmetry_violations().is_empty());
}
