//! Error types for the scene index.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Operating on an unknown entity or tag is never an error: the index is a
//! best-effort cache, so such lookups return empty results instead.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// Convenience alias for results carrying an index [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for scene index operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a cycle error for parenting `child` under `parent`.
    #[must_use]
    pub fn cycle(child: EntityId, parent: EntityId) -> Self {
        Self::new(ErrorKind::Cycle { child, parent })
    }

    /// Creates a consistency violation error from validation discrepancies.
    #[must_use]
    pub fn consistency_violation(errors: Vec<String>) -> Self {
        Self::new(ErrorKind::ConsistencyViolation { errors })
    }

    /// Returns true if this is a cycle error.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self.kind, ErrorKind::Cycle { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Setting the parent would make an entity its own ancestor.
    ///
    /// The hierarchy is left unchanged.
    #[error("cycle: {parent} cannot become the parent of {child}")]
    Cycle {
        /// The entity being reparented.
        child: EntityId,
        /// The rejected parent.
        parent: EntityId,
    },

    /// The indices disagree with the authoritative store.
    #[error("consistency violation: {} discrepancies{}", .errors.len(), first_entry(.errors))]
    ConsistencyViolation {
        /// One human-readable entry per discrepancy.
        errors: Vec<String>,
    },
}

fn first_entry(errors: &[String]) -> String {
    errors
        .first()
        .map(|e| format!(" (first: {e})"))
        .unwrap_or_default()
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation that failed, e.g. `entity-updated` or `set_parent`.
    pub operation: Option<String>,
    /// Sequence number of the inbound event that triggered the error.
    pub event_seq: Option<u64>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the event sequence number.
    #[must_use]
    pub fn with_event_seq(mut self, seq: u64) -> Self {
        self.event_seq = Some(seq);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(seq) = self.event_seq {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "(event #{seq})")?;
        }
        Ok(())
    }
}
