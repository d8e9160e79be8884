//! Entity, hierarchy, and component indices for the scene index.
//!
//! This crate provides:
//! - [`EntityIndex`] - The set of live entity identifiers
//! - [`HierarchyIndex`] - Bidirectional parent/children relation, acyclic
//! - [`ComponentIndex`] - Tag membership sets with set-algebra queries
//! - [`Indices`] - The three indices as one consistent unit

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod hierarchy;
pub mod indices;

pub use component::ComponentIndex;
pub use entity::EntityIndex;
pub use hierarchy::HierarchyIndex;
pub use indices::{IndexStats, Indices};
