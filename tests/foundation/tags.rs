//! Integration tests for tag interning

use sceneindex_foundation::TagRegistry;

#[test]
fn interning_is_stable() {
    let mut registry = TagRegistry::new();
    let transform = registry.intern("Transform");
    let mesh = registry.intern("Mesh");

    assert_ne!(transform, mesh);
    assert_eq!(registry.intern("Transform"), transform);
    assert_eq!(registry.len(), 2);
}

#[test]
fn lookup_does_not_intern() {
    let mut registry = TagRegistry::new();
    registry.intern("Light");

    assert!(registry.get("Camera").is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn names_round_trip() {
    let mut registry = TagRegistry::new();
    let id = registry.intern("Collider");

    assert_eq!(registry.name(id), Some("Collider"));
    assert_eq!(registry.get("Collider"), Some(id));
}
