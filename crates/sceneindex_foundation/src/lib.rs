//! Core identifiers, tag interning, and error types for the scene index.
//!
//! This crate provides:
//! - [`EntityId`] - Opaque, externally-assigned entity identifiers
//! - [`TagId`] / [`TagRegistry`] - Interned component tags
//! - [`Error`] - Error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod tag;

pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use tag::{TagId, TagRegistry};
