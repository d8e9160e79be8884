//! Tag membership index with set-algebra queries.
//!
//! Maps each component tag to the set of entities carrying it. Tags with
//! no members are pruned, so memory tracks active cardinality rather than
//! the number of tags ever seen.

use std::collections::{HashMap, HashSet};

use sceneindex_foundation::{EntityId, TagId};

/// Per-tag membership sets.
#[derive(Clone, Debug, Default)]
pub struct ComponentIndex {
    /// Membership: tag -> entities carrying it. Never holds an empty set.
    members: HashMap<TagId, HashSet<EntityId>>,
}

impl ComponentIndex {
    /// Creates a new empty component index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `id` carries `tag`.
    pub fn on_add(&mut self, tag: TagId, id: EntityId) {
        self.members.entry(tag).or_default().insert(id);
    }

    /// Records that `id` no longer carries `tag`.
    ///
    /// The tag entry is dropped once its last member is removed.
    pub fn on_remove(&mut self, tag: TagId, id: EntityId) {
        if let Some(set) = self.members.get_mut(&tag) {
            set.remove(&id);
            if set.is_empty() {
                self.members.remove(&tag);
            }
        }
    }

    /// Returns the membership set of a tag, if it has any members.
    #[must_use]
    pub fn members(&self, tag: TagId) -> Option<&HashSet<EntityId>> {
        self.members.get(&tag)
    }

    /// Lists the entities carrying `tag`.
    #[must_use]
    pub fn list(&self, tag: TagId) -> Vec<EntityId> {
        self.members
            .get(&tag)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Lists the entities carrying every tag in `tags`.
    ///
    /// Sets are intersected smallest first, and each step iterates the
    /// smaller of the running result and the next set, so work is bounded
    /// by the smallest intermediate result. Returns empty for no tags.
    #[must_use]
    pub fn list_with_all(&self, tags: &[TagId]) -> Vec<EntityId> {
        match tags {
            [] => return Vec::new(),
            [tag] => return self.list(*tag),
            _ => {}
        }

        let mut sets = Vec::with_capacity(tags.len());
        for tag in tags {
            match self.members.get(tag) {
                Some(set) => sets.push(set),
                // A tag with no members empties the intersection.
                None => return Vec::new(),
            }
        }
        sets.sort_by_key(|set| set.len());

        let mut acc: HashSet<EntityId> = sets[0].clone();
        for next in &sets[1..] {
            if acc.is_empty() {
                break;
            }
            acc = if acc.len() <= next.len() {
                acc.into_iter().filter(|id| next.contains(id)).collect()
            } else {
                next.iter().copied().filter(|id| acc.contains(id)).collect()
            };
        }

        acc.into_iter().collect()
    }

    /// Lists the entities carrying at least one tag in `tags`.
    #[must_use]
    pub fn list_with_any(&self, tags: &[TagId]) -> Vec<EntityId> {
        let mut acc = HashSet::new();
        for tag in tags {
            if let Some(set) = self.members.get(tag) {
                acc.extend(set.iter().copied());
            }
        }
        acc.into_iter().collect()
    }

    /// Checks whether `id` carries `tag`.
    #[must_use]
    pub fn has(&self, tag: TagId, id: EntityId) -> bool {
        self.members.get(&tag).is_some_and(|set| set.contains(&id))
    }

    /// Returns the number of entities carrying `tag`.
    #[must_use]
    pub fn get_count(&self, tag: TagId) -> usize {
        self.members.get(&tag).map_or(0, HashSet::len)
    }

    /// Returns every tag that currently has at least one member.
    #[must_use]
    pub fn get_component_types(&self) -> Vec<TagId> {
        self.members.keys().copied().collect()
    }

    /// Iterates over `(tag, members)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TagId, &HashSet<EntityId>)> + '_ {
        self.members.iter().map(|(tag, set)| (*tag, set))
    }

    /// Removes `id` from every tag.
    ///
    /// Scans all tracked tags: O(T) in the number of distinct tags.
    pub fn remove_entity(&mut self, id: EntityId) {
        self.members.retain(|_, set| {
            set.remove(&id);
            !set.is_empty()
        });
    }

    /// Removes every membership.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Returns the number of tags with at least one member.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.members.len()
    }

    /// Returns the sum of all membership set sizes.
    #[must_use]
    pub fn total_memberships(&self) -> usize {
        self.members.values().map(HashSet::len).sum()
    }
}
