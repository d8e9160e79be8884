//! Structured consistency reports.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Counts taken while producing a [`ConsistencyReport`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ReportStats {
    /// Live entities according to the store.
    pub entities_in_truth: usize,
    /// Entities in the entity index.
    pub entities_in_index: usize,
    /// Tags with at least one indexed member.
    pub tag_count: usize,
    /// Sum of indexed tag memberships.
    pub total_memberships: usize,
    /// Parent edges in the hierarchy index.
    pub hierarchy_edge_count: usize,
}

/// Outcome of comparing a scene index against its store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConsistencyReport {
    /// True when `errors` is empty.
    pub is_consistent: bool,
    /// One entry per discrepancy between the indices and the store.
    pub errors: Vec<String>,
    /// Conditions worth knowing about that are not discrepancies.
    pub warnings: Vec<String>,
    /// Counts on both sides.
    pub stats: ReportStats,
}

impl ConsistencyReport {
    /// Builds a report; consistency is derived from `errors`.
    #[must_use]
    pub fn new(errors: Vec<String>, warnings: Vec<String>, stats: ReportStats) -> Self {
        Self {
            is_consistent: errors.is_empty(),
            errors,
            warnings,
            stats,
        }
    }

    /// Returns the first `n` errors, for log lines.
    #[must_use]
    pub fn first_errors(&self, n: usize) -> &[String] {
        &self.errors[..n.min(self.errors.len())]
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_consistent {
            "consistent"
        } else {
            "INCONSISTENT"
        };
        writeln!(
            f,
            "scene index {status}: {} errors, {} warnings",
            self.errors.len(),
            self.warnings.len()
        )?;
        writeln!(
            f,
            "  entities: {} in store, {} indexed",
            self.stats.entities_in_truth, self.stats.entities_in_index
        )?;
        write!(
            f,
            "  tags: {} ({} memberships), hierarchy edges: {}",
            self.stats.tag_count, self.stats.total_memberships, self.stats.hierarchy_edge_count
        )?;
        for error in &self.errors {
            write!(f, "\n  error: {error}")?;
        }
        for warning in &self.warnings {
            write!(f, "\n  warning: {warning}")?;
        }
        Ok(())
    }
}
