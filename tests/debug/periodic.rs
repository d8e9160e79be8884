//! Integration tests for periodic checks

use std::sync::Arc;
use std::time::{Duration, Instant};

use sceneindex_debug::{CheckerConfig, DriftPolicy, PeriodicCheck};
use sceneindex_engine::{MemoryStore, SceneIndex};
use sceneindex_foundation::EntityId;

#[test]
fn production_preset_heals_on_schedule() {
    let store = Arc::new(MemoryStore::new());
    let mut index = SceneIndex::new(store.clone());
    index.initialize();
    let mut check = PeriodicCheck::new(CheckerConfig::production());
    let start = Instant::now();

    assert!(check.poll(&mut index, start).unwrap().is_consistent);

    store.set_muted(true);
    store.create(EntityId::new(1), None).unwrap();
    store.set_muted(false);

    // Not yet due.
    assert!(check.poll(&mut index, start + Duration::from_secs(1)).is_none());
    assert!(!index.has_entity(EntityId::new(1)));

    let report = check
        .poll(&mut index, start + check.config().interval)
        .unwrap();
    assert!(!report.is_consistent);
    assert!(index.has_entity(EntityId::new(1)));
    assert_eq!(check.heals(), 1);
}

#[test]
fn report_policy_keeps_running() {
    let store = Arc::new(MemoryStore::new());
    let mut index = SceneIndex::new(store.clone());
    index.initialize();
    let config = CheckerConfig::default()
        .with_interval(Duration::ZERO)
        .with_drift_policy(DriftPolicy::Report);
    let mut check = PeriodicCheck::new(config);

    store.set_muted(true);
    store.create(EntityId::new(1), None).unwrap();

    let now = Instant::now();
    for _ in 0..3 {
        assert!(!check.poll(&mut index, now).unwrap().is_consistent);
    }
    assert_eq!(check.runs(), 3);
    assert_eq!(check.heals(), 0);
}
