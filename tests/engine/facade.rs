//! Integration tests for the query facade

use std::sync::Arc;

use sceneindex_engine::{ChangeKind, IndexConfig, MemoryStore, SceneIndex};
use sceneindex_foundation::EntityId;

fn e(raw: u64) -> EntityId {
    EntityId::new(raw)
}

fn sorted(mut ids: Vec<EntityId>) -> Vec<EntityId> {
    ids.sort();
    ids
}

fn scene() -> (Arc<MemoryStore>, SceneIndex<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store.create(e(1), None).unwrap();
    store.create(e(2), Some(e(1))).unwrap();
    store.create(e(3), Some(e(1))).unwrap();
    store.create(e(4), Some(e(3))).unwrap();
    for raw in 1..=4 {
        store.add_component(e(raw), "Transform");
    }
    store.add_component(e(3), "Mesh");
    store.add_component(e(4), "Mesh");
    store.add_component(e(4), "Light");

    let mut index = SceneIndex::new(store.clone());
    index.initialize();
    (store, index)
}

#[test]
fn queries_answer_from_rebuilt_state() {
    let (_store, index) = scene();

    assert_eq!(index.entity_count(), 4);
    assert_eq!(index.get_root_entities(), vec![e(1)]);
    assert_eq!(sorted(index.get_children(e(1))), vec![e(2), e(3)]);
    assert_eq!(sorted(index.get_descendants(e(1))), vec![e(2), e(3), e(4)]);
    assert_eq!(index.get_ancestors(e(4)), vec![e(3), e(1)]);
    assert_eq!(
        sorted(index.list_entities_with_all_tags(&["Mesh", "Transform"])),
        vec![e(3), e(4)]
    );
    assert_eq!(index.list_entities_with_all_tags(&["Light", "Mesh"]), vec![e(4)]);
    assert_eq!(sorted(index.list_entities_with_any_tag(&["Light", "Mesh"])), vec![e(3), e(4)]);
    assert_eq!(index.get_tag_count("Transform"), 4);
    assert!(index.has_tag(e(4), "Light"));
    assert!(!index.has_tag(e(1), "Light"));
}

#[test]
fn stats_match_queries() {
    let (_store, index) = scene();
    let stats = index.stats();

    assert_eq!(stats.entities, 4);
    assert_eq!(stats.tags, 3);
    assert_eq!(stats.memberships, 7);
    assert_eq!(stats.hierarchy_edges, 3);
}

#[test]
fn notifications_carry_stats() {
    let (store, mut index) = scene();
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = seen.clone();
    index.subscribe(move |change| sink.lock().push(*change));

    store.delete(e(4));
    index.pump().unwrap();

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind, ChangeKind::Events);
    assert_eq!(seen[0].events_applied, 1);
    assert_eq!(seen[0].stats.entities, 3);
}

#[test]
fn independent_instances_do_not_interfere() {
    let (store_a, mut a) = scene();
    let store_b = Arc::new(MemoryStore::new());
    let mut b = SceneIndex::with_config(store_b.clone(), IndexConfig::production());
    b.initialize();

    store_b.create(e(1), None).unwrap();
    store_a.delete(e(1));
    a.pump().unwrap();
    b.pump().unwrap();

    assert!(!a.has_entity(e(1)));
    assert!(b.has_entity(e(1)));
    assert_eq!(b.entity_count(), 1);
}

#[test]
fn bounded_pump_leaves_remaining_events_queued() {
    let store = Arc::new(MemoryStore::new());
    let config = IndexConfig::default().with_max_events_per_pump(Some(2));
    let mut index = SceneIndex::with_config(store.clone(), config);
    index.initialize();
    for raw in 0..5 {
        store.create(e(raw), None).unwrap();
    }

    assert_eq!(index.pump().unwrap().applied, 2);
    assert_eq!(index.pending_events(), 3);
    index.pump().unwrap();
    index.pump().unwrap();
    assert_eq!(index.entity_count(), 5);
    assert!(index.validate().is_empty());
}
