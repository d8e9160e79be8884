//! Configuration for consistency checking.

use std::time::Duration;

/// What a periodic check does when it finds drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriftPolicy {
    /// Log the report and keep running.
    #[default]
    Report,
    /// Log the report, then rebuild the indices from the store.
    Heal,
    /// Log the report, then panic. For development builds only; the other
    /// policies never halt the host.
    Abort,
}

/// Configuration for [`PeriodicCheck`](crate::PeriodicCheck) and
/// [`ConsistencyChecker`](crate::ConsistencyChecker).
#[derive(Clone, Debug)]
pub struct CheckerConfig {
    /// Minimum time between periodic checks.
    pub interval: Duration,

    /// Response to a failed periodic check.
    pub drift_policy: DriftPolicy,

    /// How many discrepancies are written to the log per report.
    pub max_logged_errors: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            drift_policy: DriftPolicy::Report,
            max_logged_errors: 10,
        }
    }
}

impl CheckerConfig {
    /// Creates a configuration for development: check every second and
    /// treat drift as fatal.
    #[must_use]
    pub fn development() -> Self {
        Self {
            interval: Duration::from_secs(1),
            drift_policy: DriftPolicy::Abort,
            max_logged_errors: 50,
        }
    }

    /// Creates a configuration for production: check occasionally and
    /// heal drift by rebuilding.
    #[must_use]
    pub fn production() -> Self {
        Self {
            interval: Duration::from_secs(30),
            drift_policy: DriftPolicy::Heal,
            max_logged_errors: 5,
        }
    }

    /// Builder method to set the check interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Builder method to set the drift policy.
    #[must_use]
    pub fn with_drift_policy(mut self, policy: DriftPolicy) -> Self {
        self.drift_policy = policy;
        self
    }

    /// Builder method to set how many discrepancies are logged.
    #[must_use]
    pub fn with_max_logged_errors(mut self, max: usize) -> Self {
        self.max_logged_errors = max;
        self
    }
}
