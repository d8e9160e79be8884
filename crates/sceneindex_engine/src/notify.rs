//! Change notification for index consumers.
//!
//! Consumers that cache query results (render lists, editor outlines)
//! subscribe here and are told once per batch of index mutations.

use std::fmt;

use sceneindex_storage::IndexStats;

/// Handle returned by [`ChangeNotifier::subscribe`].
pub type SubscriberId = u64;

type Callback = Box<dyn FnMut(&IndexChange) + Send + Sync + 'static>;

/// What kind of batch changed the indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// Store events were applied.
    Events,
    /// The indices were rebuilt from the store.
    Rebuilt,
    /// The indices were cleared.
    Cleared,
}

/// Notification payload describing one batch of mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexChange {
    /// The kind of batch.
    pub kind: ChangeKind,
    /// Number of store events applied in the batch (zero for rebuilds).
    pub events_applied: usize,
    /// Index counts after the batch.
    pub stats: IndexStats,
}

/// Ordered list of change subscribers.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: SubscriberId,
    subscribers: Vec<(SubscriberId, Callback)>,
}

impl ChangeNotifier {
    /// Creates a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback, returning its handle.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&IndexChange) + Send + Sync + 'static,
    {
        self.next_id += 1;
        let id = self.next_id;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Calls every subscriber, in subscription order.
    pub fn notify(&mut self, change: &IndexChange) {
        for (_, callback) in &mut self.subscribers {
            callback(change);
        }
    }

    /// Returns the number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns true if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
