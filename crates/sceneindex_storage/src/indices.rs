//! The entity, hierarchy, and component indices as one unit.
//!
//! `Indices` is the unified interface to all three indices. Its mutating
//! methods either fully apply or leave every index untouched, so the
//! triple never exposes a half-applied lifecycle event.

use sceneindex_foundation::{EntityId, Error, Result, TagId, TagRegistry};

use crate::component::ComponentIndex;
use crate::entity::EntityIndex;
use crate::hierarchy::HierarchyIndex;

/// Summary counts over the three indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of indexed entities.
    pub entities: usize,
    /// Number of tags with at least one member.
    pub tags: usize,
    /// Sum of all tag membership set sizes.
    pub memberships: usize,
    /// Number of parent/child edges.
    pub hierarchy_edges: usize,
}

/// The three indices plus the tag registry that keys the component index.
#[derive(Clone, Debug, Default)]
pub struct Indices {
    entities: EntityIndex,
    hierarchy: HierarchyIndex,
    components: ComponentIndex,
    tags: TagRegistry,
}

impl Indices {
    /// Creates empty indices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entity index.
    #[must_use]
    pub fn entities(&self) -> &EntityIndex {
        &self.entities
    }

    /// Returns the hierarchy index.
    #[must_use]
    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    /// Returns the component index.
    #[must_use]
    pub fn components(&self) -> &ComponentIndex {
        &self.components
    }

    /// Returns the tag registry.
    #[must_use]
    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Resolves a tag name without interning it.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<TagId> {
        self.tags.get(name)
    }

    /// Indexes a newly created entity under an optional parent.
    ///
    /// # Errors
    ///
    /// Returns a cycle error if `parent` is `id` or one of its descendants
    /// (possible only when `id` was already indexed). Nothing is indexed
    /// in that case.
    pub fn create_entity(&mut self, id: EntityId, parent: Option<EntityId>) -> Result<()> {
        if let Some(p) = parent {
            if self.hierarchy.would_create_cycle(id, p) {
                return Err(Error::cycle(id, p));
            }
        }
        self.entities.add(id);
        self.hierarchy.set_parent(id, parent)
    }

    /// Indexes an entity as live without touching the hierarchy.
    ///
    /// Used when an entity's creation must be recorded but its parent
    /// cannot be.
    pub fn insert_entity(&mut self, id: EntityId) {
        self.entities.add(id);
    }

    /// Drops an entity from all three indices, orphaning its children.
    pub fn delete_entity(&mut self, id: EntityId) {
        self.entities.delete(id);
        self.hierarchy.remove_entity(id);
        self.components.remove_entity(id);
    }

    /// Changes the parent of an entity.
    ///
    /// # Errors
    ///
    /// Returns a cycle error if the new parent is the entity itself or one
    /// of its descendants; the hierarchy is left unchanged.
    pub fn update_parent(&mut self, id: EntityId, parent: Option<EntityId>) -> Result<()> {
        self.hierarchy.set_parent(id, parent)
    }

    /// Records that `id` carries the tag named `name`, interning it.
    pub fn add_tag(&mut self, name: &str, id: EntityId) -> TagId {
        let tag = self.tags.intern(name);
        self.components.on_add(tag, id);
        tag
    }

    /// Records that `id` no longer carries the tag named `name`.
    ///
    /// A name that was never interned has no members, so this is a no-op.
    pub fn remove_tag(&mut self, name: &str, id: EntityId) {
        if let Some(tag) = self.tags.get(name) {
            self.components.on_remove(tag, id);
        }
    }

    /// Clears all three indices. Interned tag IDs stay valid.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.hierarchy.clear();
        self.components.clear();
    }

    /// Returns summary counts.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entities: self.entities.len(),
            tags: self.components.tag_count(),
            memberships: self.components.total_memberships(),
            hierarchy_edges: self.hierarchy.edge_count(),
        }
    }
}
