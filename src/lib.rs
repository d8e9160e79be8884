//! Sceneindex - Incrementally maintained indices over an entity store
//!
//! This crate re-exports all layers of the scene index for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: sceneindex_debug      — Consistency checker, drift reports
//! Layer 2: sceneindex_engine     — Event adapter, query facade, reference store
//! Layer 1: sceneindex_storage    — Entity, hierarchy, and component indices
//! Layer 0: sceneindex_foundation — Core types (EntityId, TagId, Error)
//! ```

pub use sceneindex_debug as debug;
pub use sceneindex_engine as engine;
pub use sceneindex_foundation as foundation;
pub use sceneindex_storage as storage;
