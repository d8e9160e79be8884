//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: EntityId, TagRegistry, and Error.

mod ids;
mod tags;
