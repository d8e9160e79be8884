//! Tag interning for component types.
//!
//! Component tags arrive from the entity store as strings. They are
//! interned once so the index can key its membership sets by a small
//! copyable [`TagId`] and compare tags without touching string data.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interned tag identifier.
///
/// Tags name a component type, like `Transform` or `MeshRenderer`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagId(u32);

impl TagId {
    /// Returns the raw index of this tag.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagId({})", self.0)
    }
}

/// Registry mapping tag names to [`TagId`]s and back.
///
/// Interned IDs are stable for the lifetime of the registry; clearing the
/// indices that use them does not reset the registry.
/// It is not thread-safe; use external synchronization if needed.
#[derive(Clone, Debug, Default)]
pub struct TagRegistry {
    /// Tag names indexed by `TagId`.
    names: Vec<Arc<str>>,
    /// Map from tag name to `TagId`.
    lookup: HashMap<Arc<str>, TagId>,
}

impl TagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a tag name, returning its [`TagId`].
    ///
    /// # Panics
    ///
    /// Panics if the number of interned tags exceeds `u32::MAX`.
    pub fn intern(&mut self, name: &str) -> TagId {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }

        let id = TagId(u32::try_from(self.names.len()).expect("too many tags"));
        let arc: Arc<str> = name.into();
        self.names.push(arc.clone());
        self.lookup.insert(arc, id);
        id
    }

    /// Looks up a tag by name without interning it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TagId> {
        self.lookup.get(name).copied()
    }

    /// Gets the name of a tag.
    #[must_use]
    pub fn name(&self, id: TagId) -> Option<&str> {
        self.names.get(id.0 as usize).map(AsRef::as_ref)
    }

    /// Returns the number of interned tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no tags have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
