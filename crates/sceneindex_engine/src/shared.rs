//! A cloneable, lock-guarded [`SceneIndex`] handle.
//!
//! Hosts that query from several threads (a render thread and a script
//! thread, say) share one index through this handle. Queries take the read
//! lock and run concurrently; `pump` and `rebuild` take the write lock, so
//! readers never observe a half-applied batch.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use sceneindex_foundation::Result;
use sceneindex_storage::IndexStats;

use crate::adapter::PumpStats;
use crate::config::IndexConfig;
use crate::scene::SceneIndex;
use crate::source::EntitySource;

/// Shared handle to a [`SceneIndex`].
#[derive(Debug)]
pub struct SharedSceneIndex<S> {
    inner: Arc<RwLock<SceneIndex<S>>>,
}

impl<S> Clone for SharedSceneIndex<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EntitySource> SharedSceneIndex<S> {
    /// Wraps an existing index.
    #[must_use]
    pub fn new(index: SceneIndex<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Creates, initializes, and wraps an index over `source`.
    #[must_use]
    pub fn initialized(source: Arc<S>, config: IndexConfig) -> Self {
        let mut index = SceneIndex::with_config(source, config);
        index.initialize();
        Self::new(index)
    }

    /// Takes the read lock for a batch of queries.
    pub fn read(&self) -> RwLockReadGuard<'_, SceneIndex<S>> {
        self.inner.read()
    }

    /// Takes the write lock.
    pub fn write(&self) -> RwLockWriteGuard<'_, SceneIndex<S>> {
        self.inner.write()
    }

    /// Applies queued store events under the write lock.
    ///
    /// # Errors
    ///
    /// See [`SceneIndex::pump`].
    pub fn pump(&self) -> Result<PumpStats> {
        self.inner.write().pump()
    }

    /// Rebuilds from the store under the write lock.
    pub fn rebuild(&self) -> IndexStats {
        self.inner.write().rebuild()
    }
}
