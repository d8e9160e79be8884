//! Translates store lifecycle events into index mutations.
//!
//! The adapter is the only writer of the indices. It is either detached
//! (initial and terminal state) or attached to a store subscription.
//! While attached, each inbound event triggers exactly one mutation of
//! the index triple, in emission order:
//!
//! | Event | Mutation |
//! |---|---|
//! | `entity-created(id, parent?)` | add `id`, set its parent |
//! | `entity-deleted(id)` | drop `id` from all three indices |
//! | `entity-updated(id, parent?)` | set the parent of `id` |
//! | `entities-cleared` | clear all three indices |
//! | `component-added(tag, id)` | add `id` to `tag` |
//! | `component-removed(tag, id)` | remove `id` from `tag` |

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use sceneindex_foundation::{EntityId, ErrorContext, Result};
use sceneindex_storage::{IndexStats, Indices};
use tracing::{debug, info, warn};

use crate::config::{CyclePolicy, IndexConfig};
use crate::event::StoreEvent;
use crate::source::EntitySource;

/// Subscription state of an [`IndexAdapter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterState {
    /// Not following the store. Inbound events are ignored.
    Detached,
    /// Subscribed to the store's event stream.
    Attached,
}

/// What happened to a single inbound event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The adapter is detached; nothing was mutated.
    Ignored,
    /// The event's mutation was applied.
    Applied,
    /// The event would have created a cycle. Its parent change was dropped;
    /// a created entity is still indexed.
    Rejected,
    /// The event would have created a cycle and was applied with no parent.
    Orphaned,
}

/// Counts from one [`IndexAdapter::pump`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Events whose mutation was applied as emitted.
    pub applied: usize,
    /// Cycle-producing events dropped under [`CyclePolicy::Reject`].
    pub rejected: usize,
    /// Cycle-producing events applied parentless under [`CyclePolicy::Detach`].
    pub orphaned: usize,
}

impl PumpStats {
    /// Returns the number of events applied with their parent change.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.applied + self.orphaned
    }

    /// Returns the number of events taken off the stream.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.applied + self.rejected + self.orphaned
    }

    fn record(&mut self, outcome: EventOutcome) {
        match outcome {
            EventOutcome::Applied => self.applied += 1,
            EventOutcome::Rejected => self.rejected += 1,
            EventOutcome::Orphaned => self.orphaned += 1,
            EventOutcome::Ignored => {}
        }
    }
}

/// Keeps an [`Indices`] triple in step with an [`EntitySource`].
#[derive(Debug)]
pub struct IndexAdapter<S> {
    source: Arc<S>,
    events: Option<Receiver<StoreEvent>>,
    cycle_policy: CyclePolicy,
    max_events_per_pump: Option<usize>,
    /// Sequence number of the last event taken off the stream.
    seq: u64,
    /// Total events that mutated the indices over the adapter's lifetime.
    mutations: u64,
}

impl<S: EntitySource> IndexAdapter<S> {
    /// Creates a detached adapter over `source`.
    #[must_use]
    pub fn new(source: Arc<S>, config: &IndexConfig) -> Self {
        Self {
            source,
            events: None,
            cycle_policy: config.cycle_policy,
            max_events_per_pump: config.max_events_per_pump,
            seq: 0,
            mutations: 0,
        }
    }

    /// Returns the store this adapter follows.
    #[must_use]
    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AdapterState {
        if self.events.is_some() {
            AdapterState::Attached
        } else {
            AdapterState::Detached
        }
    }

    /// Returns true while subscribed to the store.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.events.is_some()
    }

    /// Returns the number of events queued and not yet pumped.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.events.as_ref().map_or(0, Receiver::len)
    }

    /// Returns the total number of events that mutated the indices.
    #[must_use]
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Subscribes to the store's event stream. No-op when attached.
    pub fn attach(&mut self) {
        if self.events.is_some() {
            return;
        }
        self.events = Some(self.source.subscribe());
        info!("index adapter attached");
    }

    /// Drops the store subscription. No-op when detached.
    pub fn detach(&mut self) {
        if self.events.take().is_some() {
            info!(seq = self.seq, "index adapter detached");
        }
    }

    /// Applies one event to `indices`, honouring the cycle policy.
    ///
    /// Returns [`EventOutcome::Ignored`] while detached.
    ///
    /// # Errors
    ///
    /// Returns a cycle error under [`CyclePolicy::Propagate`] when the event
    /// would create a parent cycle. The indices are left unchanged.
    pub fn apply(&mut self, indices: &mut Indices, event: &StoreEvent) -> Result<EventOutcome> {
        if !self.is_attached() {
            return Ok(EventOutcome::Ignored);
        }
        self.seq += 1;
        self.handle(indices, event)
    }

    /// Drains queued events in emission order, up to the configured limit.
    ///
    /// # Errors
    ///
    /// Under [`CyclePolicy::Propagate`], stops at the first cycle-producing
    /// event and returns its error. Events already applied stay applied;
    /// events behind the failing one stay queued.
    pub fn pump(&mut self, indices: &mut Indices) -> Result<PumpStats> {
        let mut stats = PumpStats::default();
        let Some(events) = self.events.clone() else {
            return Ok(stats);
        };

        let limit = self.max_events_per_pump.unwrap_or(usize::MAX);
        while stats.processed() < limit {
            let Ok(event) = events.try_recv() else {
                break;
            };
            self.seq += 1;
            stats.record(self.handle(indices, &event)?);
        }

        if stats.processed() > 0 {
            debug!(
                applied = stats.applied,
                rejected = stats.rejected,
                orphaned = stats.orphaned,
                "pumped store events"
            );
        }
        Ok(stats)
    }

    fn handle(&mut self, indices: &mut Indices, event: &StoreEvent) -> Result<EventOutcome> {
        let outcome = match Self::mutate(indices, event) {
            Ok(()) => {
                debug!(seq = self.seq, %event, "applied store event");
                EventOutcome::Applied
            }
            Err(err) if err.is_cycle() => match self.cycle_policy {
                CyclePolicy::Reject => {
                    // The entity is live even though its parent is not recorded.
                    if let StoreEvent::EntityCreated { id, .. } = event {
                        indices.insert_entity(*id);
                        self.mutations += 1;
                    }
                    warn!(seq = self.seq, %event, error = %err, "dropped parent of cycle-producing event");
                    EventOutcome::Rejected
                }
                CyclePolicy::Detach => {
                    let orphaned = match event {
                        StoreEvent::EntityCreated { id, .. } => StoreEvent::EntityCreated {
                            id: *id,
                            parent: None,
                        },
                        StoreEvent::EntityUpdated { id, .. } => StoreEvent::EntityUpdated {
                            id: *id,
                            parent: None,
                        },
                        other => other.clone(),
                    };
                    Self::mutate(indices, &orphaned)?;
                    warn!(seq = self.seq, %event, error = %err, "applied cycle-producing event without parent");
                    EventOutcome::Orphaned
                }
                CyclePolicy::Propagate => {
                    return Err(err.with_context(
                        ErrorContext::new()
                            .with_operation(event.name())
                            .with_event_seq(self.seq),
                    ));
                }
            },
            Err(err) => return Err(err),
        };

        if outcome != EventOutcome::Rejected {
            self.mutations += 1;
        }
        Ok(outcome)
    }

    fn mutate(indices: &mut Indices, event: &StoreEvent) -> Result<()> {
        match event {
            StoreEvent::EntityCreated { id, parent } => indices.create_entity(*id, *parent)?,
            StoreEvent::EntityDeleted { id } => indices.delete_entity(*id),
            StoreEvent::EntityUpdated { id, parent } => indices.update_parent(*id, *parent)?,
            StoreEvent::EntitiesCleared => indices.clear(),
            StoreEvent::ComponentAdded { tag, id } => {
                indices.add_tag(tag, *id);
            }
            StoreEvent::ComponentRemoved { tag, id } => indices.remove_tag(tag, *id),
        }
        Ok(())
    }

    /// Clears `indices` and re-derives them from the store's current state.
    ///
    /// Events already queued are discarded first: the snapshot read here
    /// reflects them. Events emitted afterwards are applied by the next
    /// [`pump`](Self::pump). The store is read once, through
    /// [`EntitySource::snapshot`].
    pub fn rebuild(&mut self, indices: &mut Indices) -> IndexStats {
        if let Some(events) = &self.events {
            let discarded = events.try_iter().count();
            if discarded > 0 {
                self.seq += discarded as u64;
                debug!(discarded, "discarded events superseded by rebuild");
            }
        }

        indices.clear();

        let snapshot = self.source.snapshot();
        for record in &snapshot.entities {
            if let Err(err) = indices.create_entity(record.id, record.parent) {
                warn!(entity = %record.id, error = %err, "store hierarchy has a cycle; indexing entity as root");
                indices.insert_entity(record.id);
            }
        }

        for (tag, members) in &snapshot.tags {
            for id in members {
                indices.add_tag(tag, *id);
            }
        }

        let stats = indices.stats();
        info!(
            entities = stats.entities,
            tags = stats.tags,
            memberships = stats.memberships,
            hierarchy_edges = stats.hierarchy_edges,
            "rebuilt indices from store"
        );
        stats
    }

    /// Compares `indices` against a fresh read of the store's state.
    ///
    /// Returns one human-readable entry per discrepancy; empty when the
    /// indices are consistent. Does not mutate.
    #[must_use]
    pub fn validate(&self, indices: &Indices) -> Vec<String> {
        let mut errors = Vec::new();

        let snapshot = self.source.snapshot();
        let truth: BTreeMap<EntityId, Option<EntityId>> = snapshot
            .entities
            .iter()
            .map(|record| (record.id, record.parent))
            .collect();
        let store_tags: BTreeMap<Arc<str>, BTreeSet<EntityId>> = snapshot
            .tags
            .into_iter()
            .map(|(tag, members)| (tag, members.into_iter().collect()))
            .collect();
        let indexed: BTreeSet<EntityId> = indices.entities().iter().collect();

        // Entity set equality.
        for id in truth.keys() {
            if !indexed.contains(id) {
                errors.push(format!("entity {id} is live in the store but not indexed"));
            }
        }
        for id in &indexed {
            if !truth.contains_key(id) {
                errors.push(format!("entity {id} is indexed but not live in the store"));
            }
        }

        // Parent-pointer equality.
        let hierarchy = indices.hierarchy();
        for (id, parent) in &truth {
            let recorded = hierarchy.get_parent(*id);
            if recorded != *parent {
                errors.push(format!(
                    "parent of {id}: store has {}, index has {}",
                    describe_parent(*parent),
                    describe_parent(recorded)
                ));
            }
        }
        let mut stray: Vec<_> = hierarchy
            .parent_entries()
            .filter(|(child, _)| !truth.contains_key(child))
            .collect();
        stray.sort();
        for (child, parent) in stray {
            errors.push(format!(
                "index records parent {parent} for {child}, which is not live in the store"
            ));
        }
        for violation in hierarchy.symmetry_violations() {
            errors.push(format!("hierarchy: {violation}"));
        }

        // Per-tag membership equality.
        let mut tag_names: BTreeSet<Arc<str>> = store_tags.keys().cloned().collect();
        let registry = indices.tags();
        for tag in indices.components().get_component_types() {
            if let Some(name) = registry.name(tag) {
                tag_names.insert(name.into());
            }
        }
        for name in &tag_names {
            let expected = store_tags.get(name).cloned().unwrap_or_default();
            let actual: BTreeSet<EntityId> = indices
                .tag(name)
                .and_then(|tag| indices.components().members(tag))
                .map(|members| members.iter().copied().collect())
                .unwrap_or_default();

            for id in expected.difference(&actual) {
                errors.push(format!(
                    "tag {name}: {id} carries it in the store but not in the index"
                ));
            }
            for id in actual.difference(&expected) {
                errors.push(format!(
                    "tag {name}: {id} is indexed but does not carry it in the store"
                ));
            }
            for id in &actual {
                if !indices.entities().has(*id) {
                    errors.push(format!("tag {name}: member {id} is not an indexed entity"));
                }
            }
        }

        errors
    }
}

fn describe_parent(parent: Option<EntityId>) -> String {
    parent.map_or_else(|| "no parent".to_string(), |p| p.to_string())
}
