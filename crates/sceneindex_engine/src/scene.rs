//! The query facade over the entity, hierarchy, and component indices.
//!
//! `SceneIndex` is what rendering, physics, scripting, and UI layers talk
//! to. It owns the index triple and the adapter that keeps it in step with
//! the store, answers read queries directly from the indices, and tells
//! subscribers when a batch of mutations has landed.
//!
//! Unknown entities and unknown tag names are not errors: queries about
//! them return empty results.

use std::sync::Arc;

use sceneindex_foundation::{EntityId, Result, TagId};
use sceneindex_storage::{IndexStats, Indices};
use tracing::info;

use crate::adapter::{EventOutcome, IndexAdapter, PumpStats};
use crate::config::IndexConfig;
use crate::event::StoreEvent;
use crate::notify::{ChangeKind, ChangeNotifier, IndexChange, SubscriberId};
use crate::source::EntitySource;

/// Indexed view of an entity store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sceneindex_engine::{MemoryStore, SceneIndex};
/// use sceneindex_foundation::EntityId;
///
/// let store = Arc::new(MemoryStore::new());
/// let mut index = SceneIndex::new(store.clone());
/// index.initialize();
///
/// store.create(EntityId::new(1), None).unwrap();
/// store.create(EntityId::new(2), Some(EntityId::new(1))).unwrap();
/// index.pump().unwrap();
///
/// assert_eq!(index.get_children(EntityId::new(1)), vec![EntityId::new(2)]);
/// ```
#[derive(Debug)]
pub struct SceneIndex<S> {
    indices: Indices,
    adapter: IndexAdapter<S>,
    notifier: ChangeNotifier,
    config: IndexConfig,
}

impl<S: EntitySource> SceneIndex<S> {
    /// Creates a detached, empty index over `source` with default settings.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self::with_config(source, IndexConfig::default())
    }

    /// Creates a detached, empty index over `source`.
    #[must_use]
    pub fn with_config(source: Arc<S>, config: IndexConfig) -> Self {
        Self {
            indices: Indices::new(),
            adapter: IndexAdapter::new(source, &config),
            notifier: ChangeNotifier::new(),
            config,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attaches to the store and, unless configured otherwise, rebuilds
    /// from its current state.
    pub fn initialize(&mut self) {
        self.adapter.attach();
        if self.config.rebuild_on_initialize {
            self.rebuild();
        }
    }

    /// Detaches from the store and clears the indices.
    pub fn destroy(&mut self) {
        self.adapter.detach();
        self.indices.clear();
        info!("scene index destroyed");
        self.notify(ChangeKind::Cleared, 0);
    }

    /// Clears the indices and re-derives them from the store.
    pub fn rebuild(&mut self) -> IndexStats {
        let stats = self.adapter.rebuild(&mut self.indices);
        self.notify(ChangeKind::Rebuilt, 0);
        stats
    }

    /// Compares the indices against the store without mutating.
    ///
    /// Returns one entry per discrepancy; empty when consistent.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        self.adapter.validate(&self.indices)
    }

    /// Applies every queued store event, then notifies subscribers once if
    /// anything changed.
    ///
    /// # Errors
    ///
    /// Returns a cycle error under
    /// [`CyclePolicy::Propagate`](crate::CyclePolicy::Propagate).
    /// Subscribers are still notified of the events applied before it.
    pub fn pump(&mut self) -> Result<PumpStats> {
        let before = self.adapter.mutations();
        let result = self.adapter.pump(&mut self.indices);
        self.notify_mutations(before);
        result
    }

    /// Applies a single event delivered synchronously by the caller.
    ///
    /// # Errors
    ///
    /// Returns a cycle error under
    /// [`CyclePolicy::Propagate`](crate::CyclePolicy::Propagate).
    pub fn apply(&mut self, event: &StoreEvent) -> Result<EventOutcome> {
        let before = self.adapter.mutations();
        let result = self.adapter.apply(&mut self.indices, event);
        self.notify_mutations(before);
        result
    }

    /// Returns true while attached to the store.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.adapter.is_attached()
    }

    /// Returns the number of store events queued and not yet applied.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.adapter.pending()
    }

    /// Returns the store this index follows.
    #[must_use]
    pub fn source(&self) -> &Arc<S> {
        self.adapter.source()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    // =========================================================================
    // Change Notification
    // =========================================================================

    /// Registers a callback invoked after each batch of index mutations.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&IndexChange) + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Removes a change callback. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn notify_mutations(&mut self, before: u64) {
        let applied = self.adapter.mutations() - before;
        if applied > 0 {
            self.notify(
                ChangeKind::Events,
                usize::try_from(applied).unwrap_or(usize::MAX),
            );
        }
    }

    fn notify(&mut self, kind: ChangeKind, events_applied: usize) {
        let change = IndexChange {
            kind,
            events_applied,
            stats: self.indices.stats(),
        };
        self.notifier.notify(&change);
    }

    // =========================================================================
    // Entity Queries
    // =========================================================================

    /// Lists every indexed entity.
    #[must_use]
    pub fn list_all_entities(&self) -> Vec<EntityId> {
        self.indices.entities().list()
    }

    /// Checks whether an entity is indexed.
    #[must_use]
    pub fn has_entity(&self, id: EntityId) -> bool {
        self.indices.entities().has(id)
    }

    /// Returns the number of indexed entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.indices.entities().len()
    }

    // =========================================================================
    // Hierarchy Queries
    // =========================================================================

    /// Lists the indexed entities that have no parent.
    #[must_use]
    pub fn get_root_entities(&self) -> Vec<EntityId> {
        self.indices
            .hierarchy()
            .get_root_entities(self.indices.entities().iter())
    }

    /// Gets the parent of an entity.
    #[must_use]
    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.indices.hierarchy().get_parent(id)
    }

    /// Lists the direct children of an entity.
    #[must_use]
    pub fn get_children(&self, id: EntityId) -> Vec<EntityId> {
        self.indices.hierarchy().get_children(id)
    }

    /// Lists every descendant of an entity, breadth-first.
    #[must_use]
    pub fn get_descendants(&self, id: EntityId) -> Vec<EntityId> {
        self.indices.hierarchy().get_descendants(id)
    }

    /// Lists the ancestors of an entity, nearest first.
    #[must_use]
    pub fn get_ancestors(&self, id: EntityId) -> Vec<EntityId> {
        self.indices.hierarchy().get_ancestors(id)
    }

    /// Checks whether parenting `child` under `parent` would create a cycle.
    #[must_use]
    pub fn would_create_cycle(&self, child: EntityId, parent: EntityId) -> bool {
        self.indices.hierarchy().would_create_cycle(child, parent)
    }

    // =========================================================================
    // Tag Queries
    // =========================================================================

    /// Lists the entities carrying `tag`.
    #[must_use]
    pub fn list_entities_with_tag(&self, tag: &str) -> Vec<EntityId> {
        self.indices
            .tag(tag)
            .map(|id| self.indices.components().list(id))
            .unwrap_or_default()
    }

    /// Lists the entities carrying every tag in `tags`.
    ///
    /// Empty if `tags` is empty or names a tag nobody carries.
    #[must_use]
    pub fn list_entities_with_all_tags(&self, tags: &[&str]) -> Vec<EntityId> {
        let resolved: Option<Vec<TagId>> = tags.iter().map(|name| self.indices.tag(name)).collect();
        resolved
            .map(|ids| self.indices.components().list_with_all(&ids))
            .unwrap_or_default()
    }

    /// Lists the entities carrying at least one tag in `tags`.
    #[must_use]
    pub fn list_entities_with_any_tag(&self, tags: &[&str]) -> Vec<EntityId> {
        let resolved: Vec<TagId> = tags
            .iter()
            .filter_map(|name| self.indices.tag(name))
            .collect();
        self.indices.components().list_with_any(&resolved)
    }

    /// Checks whether an entity carries `tag`.
    #[must_use]
    pub fn has_tag(&self, id: EntityId, tag: &str) -> bool {
        self.indices
            .tag(tag)
            .is_some_and(|tag| self.indices.components().has(tag, id))
    }

    /// Lists the tags at least one entity carries.
    #[must_use]
    pub fn get_tag_types(&self) -> Vec<&str> {
        let tags = self.indices.tags();
        self.indices
            .components()
            .get_component_types()
            .into_iter()
            .filter_map(|id| tags.name(id))
            .collect()
    }

    /// Returns the number of entities carrying `tag`.
    #[must_use]
    pub fn get_tag_count(&self, tag: &str) -> usize {
        self.indices
            .tag(tag)
            .map_or(0, |id| self.indices.components().get_count(id))
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Returns summary counts over the indices.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        self.indices.stats()
    }

    /// Returns read access to the underlying indices.
    #[must_use]
    pub fn indices(&self) -> &Indices {
        &self.indices
    }
}
