//! Integration tests for the index triple

use sceneindex_foundation::EntityId;
use sceneindex_storage::{IndexStats, Indices};

fn e(raw: u64) -> EntityId {
    EntityId::new(raw)
}

#[test]
fn delete_clears_all_three_indices() {
    let mut indices = Indices::new();
    indices.create_entity(e(1), None).unwrap();
    indices.create_entity(e(2), Some(e(1))).unwrap();
    indices.create_entity(e(3), Some(e(2))).unwrap();
    indices.add_tag("Mesh", e(2));

    indices.delete_entity(e(2));

    assert!(!indices.entities().has(e(2)));
    assert!(indices.hierarchy().get_children(e(1)).is_empty());
    assert_eq!(indices.hierarchy().get_parent(e(3)), None);
    let mesh = indices.tag("Mesh").unwrap();
    assert!(!indices.components().has(mesh, e(2)));
}

#[test]
fn stats_track_mutations() {
    let mut indices = Indices::new();
    indices.create_entity(e(1), None).unwrap();
    indices.create_entity(e(2), Some(e(1))).unwrap();
    indices.add_tag("Mesh", e(1));
    indices.add_tag("Mesh", e(2));
    indices.add_tag("Light", e(2));

    assert_eq!(
        indices.stats(),
        IndexStats {
            entities: 2,
            tags: 2,
            memberships: 3,
            hierarchy_edges: 1,
        }
    );
}

#[test]
fn clear_keeps_tag_ids_stable() {
    let mut indices = Indices::new();
    indices.create_entity(e(1), None).unwrap();
    let before = indices.add_tag("Mesh", e(1));

    indices.clear();
    assert_eq!(indices.stats(), IndexStats::default());

    indices.create_entity(e(1), None).unwrap();
    assert_eq!(indices.add_tag("Mesh", e(1)), before);
}

#[test]
fn removing_unknown_tag_is_a_no_op() {
    let mut indices = Indices::new();
    indices.create_entity(e(1), None).unwrap();
    indices.remove_tag("Ghost", e(1));

    assert!(indices.tag("Ghost").is_none());
}
