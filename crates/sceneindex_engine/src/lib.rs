//! Event adapter, query facade, and reference store for the scene index.
//!
//! This crate provides:
//! - [`EntitySource`] - The contract an authoritative entity store fulfils
//! - [`StoreEvent`] - Entity and component lifecycle events
//! - [`IndexAdapter`] - Translates store events into index mutations
//! - [`SceneIndex`] - The read-oriented query facade
//! - [`SharedSceneIndex`] - A lock-guarded handle for multi-threaded hosts
//! - [`MemoryStore`] - An in-memory authoritative store
//!
//! Writes flow one way (store -> events -> adapter -> indices) and reads
//! flow the other (caller -> facade -> indices).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod adapter;
pub mod config;
pub mod event;
pub mod notify;
pub mod scene;
pub mod shared;
pub mod source;
pub mod store;

pub use adapter::{AdapterState, EventOutcome, IndexAdapter, PumpStats};
pub use config::{CyclePolicy, IndexConfig};
pub use event::{EntityRecord, StoreEvent};
pub use notify::{ChangeKind, ChangeNotifier, IndexChange, SubscriberId};
pub use scene::SceneIndex;
pub use shared::SharedSceneIndex;
pub use source::{EntitySource, StoreSnapshot};
pub use store::MemoryStore;
