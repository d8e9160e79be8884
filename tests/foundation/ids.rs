//! Integration tests for entity identifiers

use std::collections::HashSet;

use sceneindex_foundation::EntityId;

#[test]
fn ids_compare_by_raw_value() {
    assert_eq!(EntityId::new(7), EntityId::from(7));
    assert!(EntityId::new(1) < EntityId::new(2));
    assert_eq!(u64::from(EntityId::new(42)), 42);
}

#[test]
fn ids_are_hashable() {
    let set: HashSet<_> = [1, 2, 2, 3].into_iter().map(EntityId::new).collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn display_and_debug_differ() {
    let id = EntityId::new(5);
    assert_eq!(id.to_string(), "Entity(5)");
    assert_eq!(format!("{id:?}"), "EntityId(5)");
}
