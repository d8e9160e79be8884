//! Parent/child hierarchy with bidirectional indices.
//!
//! Each entity has at most one parent; a parent may have any number of
//! children. Both directions are indexed so parent lookup and child
//! enumeration are O(1) to reach. The relation is kept acyclic: a
//! reparenting that would make an entity its own ancestor is rejected
//! before anything is mutated.

use std::collections::{HashMap, HashSet};

use sceneindex_foundation::{EntityId, Error, Result};

/// Bidirectional parent/children relation over entity identifiers.
///
/// Invariants:
/// - no entity is its own ancestor
/// - `c` is in `children[p]` exactly when `parents[c] == p`
/// - children sets are never empty (empty sets are pruned)
#[derive(Clone, Debug, Default)]
pub struct HierarchyIndex {
    /// Upward index: child -> parent. Roots have no entry.
    parents: HashMap<EntityId, EntityId>,
    /// Downward index: parent -> children.
    children: HashMap<EntityId, HashSet<EntityId>>,
}

impl HierarchyIndex {
    /// Creates a new empty hierarchy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the parent of `child`.
    ///
    /// The child is detached from its current parent first. Passing `None`
    /// makes it a root.
    ///
    /// # Errors
    ///
    /// Returns a cycle error if `parent` is `child` itself or one of its
    /// descendants. The hierarchy is left unchanged in that case.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<()> {
        if let Some(p) = parent {
            if self.would_create_cycle(child, p) {
                return Err(Error::cycle(child, p));
            }
            if self.parents.get(&child) == Some(&p) {
                return Ok(());
            }
        }

        self.detach(child);

        if let Some(p) = parent {
            self.children.entry(p).or_default().insert(child);
            self.parents.insert(child, p);
        }

        Ok(())
    }

    /// Removes `child` from its parent's children set, pruning the set if it
    /// becomes empty, and clears the parent pointer.
    fn detach(&mut self, child: EntityId) {
        if let Some(old) = self.parents.remove(&child) {
            if let Some(siblings) = self.children.get_mut(&old) {
                siblings.remove(&child);
                if siblings.is_empty() {
                    self.children.remove(&old);
                }
            }
        }
    }

    /// Gets the parent of an entity.
    #[must_use]
    pub fn get_parent(&self, child: EntityId) -> Option<EntityId> {
        self.parents.get(&child).copied()
    }

    /// Gets the direct children of an entity.
    #[must_use]
    pub fn get_children(&self, parent: EntityId) -> Vec<EntityId> {
        self.children
            .get(&parent)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Iterates over the direct children of an entity without allocating.
    pub fn children_iter(&self, parent: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.children
            .get(&parent)
            .into_iter()
            .flat_map(|s| s.iter().copied())
    }

    /// Gets every descendant of `root`, breadth-first.
    ///
    /// `root` itself is not included.
    #[must_use]
    pub fn get_descendants(&self, root: EntityId) -> Vec<EntityId> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut frontier: Vec<EntityId> = self.children_iter(root).collect();

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for node in frontier {
                if !visited.insert(node) {
                    continue;
                }
                result.push(node);
                next.extend(self.children_iter(node));
            }
            frontier = next;
        }

        result
    }

    /// Gets the ancestors of `node`, nearest first.
    #[must_use]
    pub fn get_ancestors(&self, node: EntityId) -> Vec<EntityId> {
        let mut result = Vec::new();
        let mut current = self.get_parent(node);
        while let Some(p) = current {
            result.push(p);
            current = self.get_parent(p);
        }
        result
    }

    /// Filters `all_ids` down to the entities with no recorded parent.
    #[must_use]
    pub fn get_root_entities<I>(&self, all_ids: I) -> Vec<EntityId>
    where
        I: IntoIterator<Item = EntityId>,
    {
        all_ids
            .into_iter()
            .filter(|id| !self.parents.contains_key(id))
            .collect()
    }

    /// Checks whether parenting `child` under `candidate_parent` would
    /// create a cycle. Does not mutate.
    #[must_use]
    pub fn would_create_cycle(&self, child: EntityId, candidate_parent: EntityId) -> bool {
        let mut current = Some(candidate_parent);
        while let Some(node) = current {
            if node == child {
                return true;
            }
            current = self.get_parent(node);
        }
        false
    }

    /// Removes an entity from the hierarchy.
    ///
    /// The entity is detached from its parent, and each of its children is
    /// orphaned (becomes a root). Children are never promoted to the
    /// removed entity's own parent.
    pub fn remove_entity(&mut self, id: EntityId) {
        self.detach(id);
        if let Some(orphans) = self.children.remove(&id) {
            for orphan in orphans {
                self.parents.remove(&orphan);
            }
        }
    }

    /// Removes every edge.
    pub fn clear(&mut self) {
        self.parents.clear();
        self.children.clear();
    }

    /// Returns the number of parent/child edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.parents.len()
    }

    /// Iterates over every recorded `(child, parent)` pair.
    pub fn parent_entries(&self) -> impl Iterator<Item = (EntityId, EntityId)> + '_ {
        self.parents.iter().map(|(c, p)| (*c, *p))
    }

    /// Describes every disagreement between the upward and downward indices.
    ///
    /// Empty when the relation is symmetric.
    #[must_use]
    pub fn symmetry_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for (parent, kids) in &self.children {
            if kids.is_empty() {
                violations.push(format!("{parent} has an empty children set"));
            }
            for kid in kids {
                match self.parents.get(kid) {
                    Some(p) if p == parent => {}
                    Some(p) => violations.push(format!(
                        "{kid} is listed under {parent} but its parent is {p}"
                    )),
                    None => violations.push(format!(
                        "{kid} is listed under {parent} but has no parent"
                    )),
                }
            }
        }

        for (child, parent) in &self.parents {
            let listed = self
                .children
                .get(parent)
                .is_some_and(|kids| kids.contains(child));
            if !listed {
                violations.push(format!(
                    "{child} has parent {parent} but is not among its children"
                ));
            }
        }

        violations.sort();
        violations
    }
}
