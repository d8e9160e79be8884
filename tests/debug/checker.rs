//! Integration tests for the consistency checker

use std::sync::Arc;

use sceneindex_debug::{ConsistencyChecker, ReportStats};
use sceneindex_engine::{MemoryStore, SceneIndex};
use sceneindex_foundation::{EntityId, ErrorKind};

fn e(raw: u64) -> EntityId {
    EntityId::new(raw)
}

fn populated() -> (Arc<MemoryStore>, SceneIndex<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let mut index = SceneIndex::new(store.clone());
    index.initialize();
    store.create(e(1), None).unwrap();
    store.create(e(2), Some(e(1))).unwrap();
    store.add_component(e(1), "Transform");
    store.add_component(e(2), "Transform");
    index.pump().unwrap();
    (store, index)
}

#[test]
fn report_after_pumping_is_clean() {
    let (_store, index) = populated();
    let report = ConsistencyChecker::default().check(&index);

    assert!(report.is_consistent, "{report}");
    assert_eq!(
        report.stats,
        ReportStats {
            entities_in_truth: 2,
            entities_in_index: 2,
            tag_count: 1,
            total_memberships: 2,
            hierarchy_edge_count: 1,
        }
    );
}

#[test]
fn each_kind_of_drift_is_reported() {
    let (store, index) = populated();
    store.set_muted(true);
    store.create(e(3), None).unwrap();
    store.set_parent(e(2), None).unwrap();
    store.remove_component(e(1), "Transform");
    store.set_muted(false);

    let report = ConsistencyChecker::default().check(&index);

    assert!(!report.is_consistent);
    assert!(report.errors.iter().any(|m| m.contains("Entity(3) is live in the store but not indexed")));
    assert!(report.errors.iter().any(|m| m.contains("parent of Entity(2)")));
    assert!(report.errors.iter().any(|m| m.starts_with("tag Transform: Entity(1)")));
    assert_eq!(report.errors.len(), 3, "{report}");
}

#[test]
fn ensure_then_rebuild_then_ensure() {
    let (store, mut index) = populated();
    store.set_muted(true);
    store.delete(e(1));
    store.set_muted(false);

    let checker = ConsistencyChecker::default();
    let err = checker.ensure(&index).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConsistencyViolation { .. }));

    index.rebuild();
    let report = checker.ensure(&index).unwrap();
    assert_eq!(report.stats.entities_in_index, 1);
}

#[test]
fn assert_accepts_a_consistent_index() {
    let (_store, index) = populated();
    ConsistencyChecker::default().assert(&index);
}
