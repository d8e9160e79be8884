//! Interval-driven consistency checks.
//!
//! The host calls [`PeriodicCheck::poll`] from its update loop with the
//! current time. Once per configured interval the index is checked, and
//! drift is handled according to the [`DriftPolicy`].

use std::time::Instant;

use sceneindex_engine::{EntitySource, SceneIndex};
use sceneindex_foundation::Error;
use tracing::info;

use crate::checker::ConsistencyChecker;
use crate::config::{CheckerConfig, DriftPolicy};
use crate::report::ConsistencyReport;

/// Runs a [`ConsistencyChecker`] at most once per interval.
///
/// Under [`DriftPolicy::Report`] and [`DriftPolicy::Heal`] a check never
/// halts the host. [`DriftPolicy::Abort`] panics on drift; it is meant for
/// development and test builds only.
#[derive(Clone, Debug)]
pub struct PeriodicCheck {
    checker: ConsistencyChecker,
    config: CheckerConfig,
    last_run: Option<Instant>,
    runs: u64,
    heals: u64,
}

impl PeriodicCheck {
    /// Creates a periodic check. The first poll always runs.
    #[must_use]
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            checker: ConsistencyChecker::new(&config),
            config,
            last_run: None,
            runs: 0,
            heals: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Returns how many checks have run.
    #[must_use]
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Returns how many checks ended in a rebuild.
    #[must_use]
    pub fn heals(&self) -> u64 {
        self.heals
    }

    /// Checks whether a check is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_run
            .is_none_or(|last| now.saturating_duration_since(last) >= self.config.interval)
    }

    /// Runs a check if one is due, applying the drift policy.
    ///
    /// Returns the report when a check ran. Under [`DriftPolicy::Heal`] the
    /// report describes the drift found before the rebuild.
    ///
    /// # Panics
    ///
    /// Panics under [`DriftPolicy::Abort`] when the index has drifted.
    pub fn poll<S: EntitySource>(
        &mut self,
        index: &mut SceneIndex<S>,
        now: Instant,
    ) -> Option<ConsistencyReport> {
        if !self.is_due(now) {
            return None;
        }
        self.last_run = Some(now);
        self.runs += 1;

        let report = self.checker.check(index);
        if report.is_consistent {
            return Some(report);
        }

        match self.config.drift_policy {
            DriftPolicy::Report => {}
            DriftPolicy::Heal => {
                let stats = index.rebuild();
                self.heals += 1;
                info!(
                    discrepancies = report.errors.len(),
                    entities = stats.entities,
                    "healed scene index drift by rebuilding"
                );
            }
            DriftPolicy::Abort => {
                let err = Error::consistency_violation(report.errors.clone());
                panic!("{err}\n{report}");
            }
        }
        Some(report)
    }
}
