//! End-to-end scenarios driven through the reference store.

use std::sync::Arc;

use sceneindex_debug::ConsistencyChecker;
use sceneindex_engine::{CyclePolicy, IndexConfig, MemoryStore, SceneIndex, StoreEvent};
use sceneindex_foundation::EntityId;

fn e(raw: u64) -> EntityId {
    EntityId::new(raw)
}

fn sorted(mut ids: Vec<EntityId>) -> Vec<EntityId> {
    ids.sort();
    ids
}

#[test]
fn scene_lifecycle() {
    let store = Arc::new(MemoryStore::new());
    let config = IndexConfig::default().with_cycle_policy(CyclePolicy::Propagate);
    let mut index = SceneIndex::with_config(store.clone(), config);
    index.initialize();
    let checker = ConsistencyChecker::default();

    // A root entity.
    store.create(e(1), None).unwrap();
    index.pump().unwrap();
    assert_eq!(index.get_root_entities(), vec![e(1)]);

    // A child under it.
    store.create(e(2), Some(e(1))).unwrap();
    index.pump().unwrap();
    assert_eq!(index.get_children(e(1)), vec![e(2)]);
    assert_eq!(index.get_parent(e(2)), Some(e(1)));

    // Making the parent a child of its child is refused everywhere.
    assert!(store.set_parent(e(1), Some(e(2))).unwrap_err().is_cycle());
    assert!(index.would_create_cycle(e(1), e(2)));
    let err = index
        .apply(&StoreEvent::EntityUpdated {
            id: e(1),
            parent: Some(e(2)),
        })
        .unwrap_err();
    assert!(err.is_cycle());
    assert_eq!(index.get_parent(e(1)), None);

    // Tags.
    store.create(e(3), Some(e(2))).unwrap();
    for raw in 1..=3 {
        store.add_component(e(raw), "Transform");
    }
    store.add_component(e(2), "Mesh");
    store.add_component(e(3), "Mesh");
    index.pump().unwrap();
    assert_eq!(
        sorted(index.list_entities_with_all_tags(&["Transform", "Mesh"])),
        vec![e(2), e(3)]
    );
    assert_eq!(
        sorted(index.list_entities_with_all_tags(&["Mesh", "Transform"])),
        vec![e(2), e(3)]
    );
    checker.assert(&index);

    // Deleting a parent orphans its child and drops only its own tags.
    store.delete(e(2));
    index.pump().unwrap();
    assert_eq!(index.get_parent(e(3)), None);
    assert_eq!(sorted(index.list_entities_with_tag("Transform")), vec![e(1), e(3)]);
    assert_eq!(index.list_entities_with_tag("Mesh"), vec![e(3)]);
    checker.assert(&index);

    // Clearing the store empties the index.
    store.clear();
    index.pump().unwrap();
    assert!(index.list_all_entities().is_empty());
    assert!(index.validate().is_empty());
}

#[test]
fn rebuild_is_a_fixpoint_after_arbitrary_drift() {
    let store = Arc::new(MemoryStore::new());
    let mut index = SceneIndex::new(store.clone());
    index.initialize();

    store.create(e(1), None).unwrap();
    store.create(e(2), Some(e(1))).unwrap();
    index.pump().unwrap();

    store.set_muted(true);
    store.delete(e(1));
    store.create(e(5), Some(e(2))).unwrap();
    store.add_component(e(5), "Camera");
    store.set_muted(false);
    assert!(!index.validate().is_empty());

    index.rebuild();
    assert!(index.validate().is_empty());
    assert_eq!(index.get_root_entities(), vec![e(2)]);
    assert_eq!(index.get_descendants(e(2)), vec![e(5)]);
}

#[test]
fn destroy_then_initialize_resumes_following() {
    let store = Arc::new(MemoryStore::new());
    let mut index = SceneIndex::new(store.clone());
    index.initialize();
    store.create(e(1), None).unwrap();
    index.pump().unwrap();

    index.destroy();
    store.create(e(2), None).unwrap();
    assert_eq!(index.entity_count(), 0);

    index.initialize();
    store.create(e(3), None).unwrap();
    index.pump().unwrap();
    assert_eq!(sorted(index.list_all_entities()), vec![e(1), e(2), e(3)]);
    assert!(index.validate().is_empty());
}
