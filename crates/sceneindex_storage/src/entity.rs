//! The set of live entity identifiers.
//!
//! Membership mirrors the authoritative store's live-entity set once every
//! emitted lifecycle event has been applied.

use sceneindex_foundation::EntityId;

/// Flat set of currently-live entity identifiers.
///
/// Backed by a persistent hash set, so [`EntityIndex::snapshot`] is O(1)
/// and shares structure with the live index.
#[derive(Clone, Debug, Default)]
pub struct EntityIndex {
    live: im::HashSet<EntityId>,
}

impl EntityIndex {
    /// Creates a new empty entity index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entity. Adding a present entity is a no-op.
    pub fn add(&mut self, id: EntityId) {
        self.live.insert(id);
    }

    /// Removes an entity. Deleting an absent entity is a no-op.
    pub fn delete(&mut self, id: EntityId) {
        self.live.remove(&id);
    }

    /// Checks whether an entity is indexed.
    #[must_use]
    pub fn has(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    /// Returns all indexed entities, in no particular order.
    #[must_use]
    pub fn list(&self) -> Vec<EntityId> {
        self.live.iter().copied().collect()
    }

    /// Returns a persistent snapshot of the index.
    ///
    /// Later mutations of the index are not visible through the snapshot.
    #[must_use]
    pub fn snapshot(&self) -> im::HashSet<EntityId> {
        self.live.clone()
    }

    /// Iterates over the indexed entities.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.live.iter().copied()
    }

    /// Returns the number of indexed entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns true if no entities are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.live = im::HashSet::new();
    }
}
