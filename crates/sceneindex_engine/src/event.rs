//! Lifecycle events emitted by the authoritative entity store.

use std::fmt;
use std::sync::Arc;

use sceneindex_foundation::EntityId;

/// An entity as the store reports it: its id and optional parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityRecord {
    /// The entity's identifier.
    pub id: EntityId,
    /// The entity's parent, if any.
    pub parent: Option<EntityId>,
}

impl EntityRecord {
    /// Creates a record.
    #[must_use]
    pub const fn new(id: EntityId, parent: Option<EntityId>) -> Self {
        Self { id, parent }
    }
}

/// An entity or component lifecycle event.
///
/// Entity and component events share one stream so their relative
/// emission order is preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// An entity was created, optionally under a parent.
    EntityCreated {
        /// The new entity.
        id: EntityId,
        /// Its parent, if any.
        parent: Option<EntityId>,
    },
    /// An entity was deleted.
    EntityDeleted {
        /// The deleted entity.
        id: EntityId,
    },
    /// An entity's parent changed.
    EntityUpdated {
        /// The updated entity.
        id: EntityId,
        /// Its new parent, if any.
        parent: Option<EntityId>,
    },
    /// Every entity was removed from the store.
    EntitiesCleared,
    /// A component tag was attached to an entity.
    ComponentAdded {
        /// The component tag.
        tag: Arc<str>,
        /// The entity carrying it.
        id: EntityId,
    },
    /// A component tag was detached from an entity.
    ComponentRemoved {
        /// The component tag.
        tag: Arc<str>,
        /// The entity that carried it.
        id: EntityId,
    },
}

impl StoreEvent {
    /// Returns the event's wire-style name, e.g. `entity-created`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::EntityCreated { .. } => "entity-created",
            Self::EntityDeleted { .. } => "entity-deleted",
            Self::EntityUpdated { .. } => "entity-updated",
            Self::EntitiesCleared => "entities-cleared",
            Self::ComponentAdded { .. } => "component-added",
            Self::ComponentRemoved { .. } => "component-removed",
        }
    }

    /// Returns the entity the event concerns, if it concerns a single one.
    #[must_use]
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Self::EntityCreated { id, .. }
            | Self::EntityDeleted { id }
            | Self::EntityUpdated { id, .. }
            | Self::ComponentAdded { id, .. }
            | Self::ComponentRemoved { id, .. } => Some(*id),
            Self::EntitiesCleared => None,
        }
    }

    /// Returns true for component lifecycle events.
    #[must_use]
    pub fn is_component_event(&self) -> bool {
        matches!(
            self,
            Self::ComponentAdded { .. } | Self::ComponentRemoved { .. }
        )
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntityCreated { id, parent } | Self::EntityUpdated { id, parent } => {
                write!(f, "{}({id}", self.name())?;
                if let Some(p) = parent {
                    write!(f, ", parent {p}")?;
                }
                write!(f, ")")
            }
            Self::EntityDeleted { id } => write!(f, "{}({id})", self.name()),
            Self::EntitiesCleared => write!(f, "{}", self.name()),
            Self::ComponentAdded { tag, id } | Self::ComponentRemoved { tag, id } => {
                write!(f, "{}({tag}, {id})", self.name())
            }
        }
    }
}
