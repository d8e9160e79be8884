//! The contract the authoritative entity/component store fulfils.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use sceneindex_foundation::EntityId;

use crate::event::{EntityRecord, StoreEvent};

/// The store's entities and tag memberships, read together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Every live entity with its parent pointer.
    pub entities: Vec<EntityRecord>,
    /// Every registered tag with its members. A tag may have none.
    pub tags: Vec<(Arc<str>, Vec<EntityId>)>,
}

/// An authoritative entity/component store the index can follow.
///
/// The index never writes to the store. It subscribes to lifecycle events
/// for incremental updates, and reads the store's current state only to
/// rebuild or validate.
pub trait EntitySource {
    /// Opens a new event subscription.
    ///
    /// Every event emitted after this call is delivered to the returned
    /// receiver, in emission order. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> Receiver<StoreEvent>;

    /// Lists every live entity with its parent pointer.
    fn entities(&self) -> Vec<EntityRecord>;

    /// Lists every registered component tag, including tags no entity
    /// currently carries.
    fn tags(&self) -> Vec<Arc<str>>;

    /// Lists the entities currently carrying `tag`.
    fn entities_with_tag(&self, tag: &str) -> Vec<EntityId>;

    /// Reads entities and tag memberships as one consistent state.
    ///
    /// The default composes the individual reads, so a write landing
    /// between them is visible in some parts and not others. Stores that
    /// can be written from other threads should override it with a read
    /// under a single lock.
    fn snapshot(&self) -> StoreSnapshot {
        let entities = self.entities();
        let tags = self
            .tags()
            .into_iter()
            .map(|tag| {
                let members = self.entities_with_tag(&tag);
                (tag, members)
            })
            .collect();
        StoreSnapshot { entities, tags }
    }
}
