//! Guard over an optimistic cache write.

use tracing::debug;

use super::QueryCache;
use crate::domain::QueryKey;

/// Pending optimistic change to one cache entry.
///
/// Holds the value the entry had before the change. [`commit`] keeps
/// the optimistic value; [`rollback`] restores the snapshot. Dropping the
/// guard without settling it rolls back, so a cancelled mutation never
/// leaves speculative data behind.
///
/// [`commit`]: OptimisticUpdate::commit
/// [`rollback`]: OptimisticUpdate::rollback
#[must_use = "an unsettled optimistic update rolls back when dropped"]
pub struct OptimisticUpdate<V>
where
    V: Clone + Send + Sync + 'static,
{
    cache: QueryCache<V>,
    key: QueryKey,
    previous: Option<Option<V>>,
}

impl<V> OptimisticUpdate<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub(super) fn new(cache: QueryCache<V>, key: QueryKey, previous: Option<V>) -> Self {
        Self {
            cache,
            key,
            previous: Some(previous),
        }
    }

    /// Key the update applies to.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Value the entry held before the update.
    pub fn snapshot(&self) -> Option<&V> {
        self.previous.as_ref().and_then(Option::as_ref)
    }

    /// Keep the optimistic value.
    pub fn commit(mut self) {
        self.previous = None;
        debug!(key = %self.key, "optimistic update committed");
    }

    /// Restore the value captured before the update.
    pub fn rollback(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if let Some(previous) = self.previous.take() {
            debug!(key = %self.key, "rolling back optimistic update");
            self.cache.restore(&self.key, previous);
        }
    }
}

impl<V> Drop for OptimisticUpdate<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.restore();
    }
}
