//! In-memory authoritative entity/component store.
//!
//! `MemoryStore` is the reference [`EntitySource`]: it owns the entity set,
//! parent pointers, and tag memberships, and broadcasts a [`StoreEvent`]
//! for every change. Deleting an entity orphans its children and drops its
//! tags without emitting extra events, matching how the index handles an
//! `entity-deleted` event.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::RwLock;
use sceneindex_foundation::{EntityId, Error, Result};

use crate::event::{EntityRecord, StoreEvent};
use crate::source::{EntitySource, StoreSnapshot};

#[derive(Debug, Default)]
struct Inner {
    /// Live entities and their parents.
    entities: BTreeMap<EntityId, Option<EntityId>>,
    /// Registered tags and their members. Registered tags may be empty.
    tags: BTreeMap<Arc<str>, BTreeSet<EntityId>>,
    /// Open subscriptions. Disconnected ones are pruned on emit.
    subscribers: Vec<Sender<StoreEvent>>,
    /// When set, changes are applied but not broadcast.
    muted: bool,
}

impl Inner {
    fn emit(&mut self, event: StoreEvent) {
        if self.muted {
            return;
        }
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn would_create_cycle(&self, child: EntityId, parent: EntityId) -> bool {
        let mut current = Some(parent);
        while let Some(node) = current {
            if node == child {
                return true;
            }
            current = self.entities.get(&node).copied().flatten();
        }
        false
    }
}

/// Thread-safe in-memory entity store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity under an optional parent.
    ///
    /// Returns `Ok(false)` without emitting if `id` is already live.
    ///
    /// # Errors
    ///
    /// Returns a cycle error if `parent` is `id` itself, or if `parent`
    /// already descends from `id` through a parent pointer naming `id`
    /// before it was live.
    pub fn create(&self, id: EntityId, parent: Option<EntityId>) -> Result<bool> {
        let mut inner = self.inner.write();
        if inner.entities.contains_key(&id) {
            return Ok(false);
        }
        if let Some(p) = parent {
            if inner.would_create_cycle(id, p) {
                return Err(Error::cycle(id, p));
            }
        }
        inner.entities.insert(id, parent);
        inner.emit(StoreEvent::EntityCreated { id, parent });
        Ok(true)
    }

    /// Deletes an entity, orphaning its children and dropping its tags.
    ///
    /// Returns false if `id` was not live.
    pub fn delete(&self, id: EntityId) -> bool {
        let mut inner = self.inner.write();
        if inner.entities.remove(&id).is_none() {
            return false;
        }
        for parent in inner.entities.values_mut() {
            if *parent == Some(id) {
                *parent = None;
            }
        }
        for members in inner.tags.values_mut() {
            members.remove(&id);
        }
        inner.emit(StoreEvent::EntityDeleted { id });
        true
    }

    /// Changes the parent of a live entity.
    ///
    /// Returns `Ok(false)` if `id` is not live.
    ///
    /// # Errors
    ///
    /// Returns a cycle error if `parent` is `id` or one of its descendants.
    pub fn set_parent(&self, id: EntityId, parent: Option<EntityId>) -> Result<bool> {
        let mut inner = self.inner.write();
        if !inner.entities.contains_key(&id) {
            return Ok(false);
        }
        if let Some(p) = parent {
            if inner.would_create_cycle(id, p) {
                return Err(Error::cycle(id, p));
            }
        }
        inner.entities.insert(id, parent);
        inner.emit(StoreEvent::EntityUpdated { id, parent });
        Ok(true)
    }

    /// Registers a tag without attaching it to any entity.
    pub fn register_tag(&self, tag: &str) {
        self.inner.write().tags.entry(tag.into()).or_default();
    }

    /// Attaches a tag to a live entity, registering the tag if needed.
    ///
    /// Returns false if `id` is not live or already carries the tag.
    pub fn add_component(&self, id: EntityId, tag: &str) -> bool {
        let mut inner = self.inner.write();
        if !inner.entities.contains_key(&id) {
            return false;
        }
        let key: Arc<str> = match inner.tags.get_key_value(tag) {
            Some((key, _)) => key.clone(),
            None => tag.into(),
        };
        if !inner.tags.entry(key.clone()).or_default().insert(id) {
            return false;
        }
        inner.emit(StoreEvent::ComponentAdded { tag: key, id });
        true
    }

    /// Detaches a tag from an entity. The tag stays registered.
    ///
    /// Returns false if the entity did not carry the tag.
    pub fn remove_component(&self, id: EntityId, tag: &str) -> bool {
        let mut inner = self.inner.write();
        let Some((key, members)) = inner.tags.get_key_value(tag) else {
            return false;
        };
        if !members.contains(&id) {
            return false;
        }
        let key = key.clone();
        if let Some(members) = inner.tags.get_mut(tag) {
            members.remove(&id);
        }
        inner.emit(StoreEvent::ComponentRemoved { tag: key, id });
        true
    }

    /// Removes every entity. Registered tags are kept, emptied.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entities.clear();
        for members in inner.tags.values_mut() {
            members.clear();
        }
        inner.emit(StoreEvent::EntitiesCleared);
    }

    /// Suppresses or resumes event broadcast.
    ///
    /// While muted, changes still apply, so subscribers drift from the
    /// store's state. Intended for exercising drift detection.
    pub fn set_muted(&self, muted: bool) {
        self.inner.write().muted = muted;
    }

    /// Checks whether an entity is live.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.inner.read().entities.contains_key(&id)
    }

    /// Gets the parent of a live entity.
    #[must_use]
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.inner.read().entities.get(&id).copied().flatten()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entities.len()
    }

    /// Returns true if no entity is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().entities.is_empty()
    }

    /// Returns the number of open subscriptions.
    ///
    /// Dropped receivers are only pruned on the next emitted event.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.read().subscribers.len()
    }
}

impl EntitySource for MemoryStore {
    fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.inner.write().subscribers.push(tx);
        rx
    }

    fn entities(&self) -> Vec<EntityRecord> {
        self.inner
            .read()
            .entities
            .iter()
            .map(|(id, parent)| EntityRecord::new(*id, *parent))
            .collect()
    }

    fn tags(&self) -> Vec<Arc<str>> {
        self.inner.read().tags.keys().cloned().collect()
    }

    fn entities_with_tag(&self, tag: &str) -> Vec<EntityId> {
        self.inner
            .read()
            .tags
            .get(tag)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    fn snapshot(&self) -> StoreSnapshot {
        let inner = self.inner.read();
        StoreSnapshot {
            entities: inner
                .entities
                .iter()
                .map(|(id, parent)| EntityRecord::new(*id, *parent))
                .collect(),
            tags: inner
                .tags
                .iter()
                .map(|(tag, members)| (tag.clone(), members.iter().copied().collect()))
                .collect(),
        }
    }
}
