//! Read-only comparison of a scene index against its store.

use sceneindex_engine::{EntitySource, SceneIndex, StoreSnapshot};
use sceneindex_foundation::{Error, Result};
use tracing::warn;

use crate::config::CheckerConfig;
use crate::report::{ConsistencyReport, ReportStats};

/// Produces [`ConsistencyReport`]s for a [`SceneIndex`].
#[derive(Clone, Debug)]
pub struct ConsistencyChecker {
    max_logged_errors: usize,
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self::new(&CheckerConfig::default())
    }
}

impl ConsistencyChecker {
    /// Creates a checker.
    #[must_use]
    pub fn new(config: &CheckerConfig) -> Self {
        Self {
            max_logged_errors: config.max_logged_errors,
        }
    }

    /// Compares `index` against a fresh read of its store.
    ///
    /// Does not mutate. Drift is logged at warn level.
    #[must_use]
    pub fn check<S: EntitySource>(&self, index: &SceneIndex<S>) -> ConsistencyReport {
        let errors = index.validate();
        let snapshot = index.source().snapshot();
        let warnings = Self::warnings(index, &snapshot);

        let indexed = index.stats();
        let stats = ReportStats {
            entities_in_truth: snapshot.entities.len(),
            entities_in_index: indexed.entities,
            tag_count: indexed.tags,
            total_memberships: indexed.memberships,
            hierarchy_edge_count: indexed.hierarchy_edges,
        };

        let report = ConsistencyReport::new(errors, warnings, stats);
        if !report.is_consistent {
            warn!(
                errors = report.errors.len(),
                first = ?report.first_errors(self.max_logged_errors),
                "scene index drifted from store"
            );
        }
        report
    }

    /// Checks `index` and panics with the full report if it has drifted.
    ///
    /// Meant for tests and development builds.
    ///
    /// # Panics
    ///
    /// Panics if the report has any errors.
    pub fn assert<S: EntitySource>(&self, index: &SceneIndex<S>) {
        let report = self.check(index);
        assert!(report.is_consistent, "{report}");
    }

    /// Checks `index`, turning drift into an error.
    ///
    /// # Errors
    ///
    /// Returns a consistency violation carrying every discrepancy.
    pub fn ensure<S: EntitySource>(&self, index: &SceneIndex<S>) -> Result<ConsistencyReport> {
        let report = self.check(index);
        if report.is_consistent {
            Ok(report)
        } else {
            Err(Error::consistency_violation(report.errors))
        }
    }

    fn warnings<S: EntitySource>(index: &SceneIndex<S>, snapshot: &StoreSnapshot) -> Vec<String> {
        let mut warnings = Vec::new();

        let pending = index.pending_events();
        if pending > 0 {
            warnings.push(format!("{pending} store events are queued and not yet applied"));
        }

        let indices = index.indices();
        let mut dangling: Vec<_> = indices
            .hierarchy()
            .parent_entries()
            .filter(|(_, parent)| !indices.entities().has(*parent))
            .collect();
        dangling.sort();
        for (child, parent) in dangling {
            warnings.push(format!(
                "{child} has parent {parent}, which is not an indexed entity"
            ));
        }

        for (tag, members) in &snapshot.tags {
            if members.is_empty() {
                warnings.push(format!("tag {tag} is registered but has no members"));
            }
        }

        warnings
    }
}
