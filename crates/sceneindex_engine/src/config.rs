//! Configuration for the index adapter and facade.

/// What the adapter does when an inbound event would create a parent cycle.
///
/// A well-behaved store never emits such an event, so one arriving means
/// the index has already drifted (usually from a missed event).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Drop the parent change and keep the prior relation. A created
    /// entity is still indexed, as a root if it was not indexed before.
    #[default]
    Reject,
    /// Apply the event with no parent, making the entity a root.
    Detach,
    /// Stop pumping and return the error. Later events stay queued.
    Propagate,
}

/// Configuration for [`SceneIndex`](crate::SceneIndex).
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// Handling of cycle-producing events.
    pub cycle_policy: CyclePolicy,

    /// Whether `initialize` rebuilds from the store after attaching.
    pub rebuild_on_initialize: bool,

    /// Upper bound on events applied per `pump` call (`None` = drain all).
    pub max_events_per_pump: Option<usize>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::Reject,
            rebuild_on_initialize: true,
            max_events_per_pump: None,
        }
    }
}

impl IndexConfig {
    /// Creates a configuration for development: cycle errors surface to
    /// the caller.
    #[must_use]
    pub fn development() -> Self {
        Self {
            cycle_policy: CyclePolicy::Propagate,
            ..Self::default()
        }
    }

    /// Creates a configuration for production: cycle-producing events are
    /// dropped and the per-frame pump is bounded.
    #[must_use]
    pub fn production() -> Self {
        Self {
            cycle_policy: CyclePolicy::Reject,
            rebuild_on_initialize: true,
            max_events_per_pump: Some(65_536),
        }
    }

    /// Builder method to set the cycle policy.
    #[must_use]
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    /// Builder method to enable/disable rebuilding on initialize.
    #[must_use]
    pub fn with_rebuild_on_initialize(mut self, rebuild: bool) -> Self {
        self.rebuild_on_initialize = rebuild;
        self
    }

    /// Builder method to bound events per pump.
    #[must_use]
    pub fn with_max_events_per_pump(mut self, max: Option<usize>) -> Self {
        self.max_events_per_pump = max;
        self
    }
}
