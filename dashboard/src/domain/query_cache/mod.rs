//! Keyed cache of query results with de-duplicated fetches, prefix
//! invalidation, and optimistic updates.
//!
//! Each [`QueryKey`] owns one entry holding the last good value, a staleness
//! flag, and at most one in-flight fetch. Concurrent readers of a missing or
//! stale entry share that fetch. Every cancellation advances the entry's
//! epoch; a fetch started under an older epoch settles without touching the
//! entry, so a slow refetch can never clobber an optimistic value.
//!
//! Consumers that want refetches pushed to them hold a [`QueryObserver`].
//! An entry with at least one live observer is *active*: invalidation
//! refetches active entries immediately and merely marks the rest stale.
//!
//! The entry map sits behind a synchronous mutex that is never held across
//! an await point.

mod optimistic;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared, join_all};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::QueryKey;
use crate::domain::ports::define_port_error;

pub use optimistic::OptimisticUpdate;

define_port_error! {
    /// Errors surfaced by query functions and the cache.
    pub enum QueryError {
        /// The query function failed.
        Fetch { message: String } => "query failed: {message}",
        /// A fetch was needed but no query function was ever supplied.
        MissingQueryFn { key: String } => "no query function registered for {key}",
    }
}

/// Future produced by a query function.
pub type QueryFuture<V> = BoxFuture<'static, Result<V, QueryError>>;

/// Function producing a fresh value for a key.
pub type QueryFn<V> = Arc<dyn Fn() -> QueryFuture<V> + Send + Sync>;

type SharedFetch<V> = Shared<QueryFuture<V>>;

/// Tunables for a [`QueryCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryCacheOptions {
    /// Age after which data counts as stale even without invalidation.
    /// `None` keeps data fresh until it is invalidated.
    pub stale_time: Option<Duration>,
}

/// Point-in-time view of one entry, for loading and error indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<V> {
    /// Last good value, if any.
    pub data: Option<V>,
    /// Whether the next read will refetch.
    pub is_stale: bool,
    /// Whether a fetch is in flight.
    pub is_fetching: bool,
    /// Error from the most recent failed fetch, cleared by the next success.
    pub last_error: Option<QueryError>,
}

struct Entry<V> {
    data: Option<V>,
    stale: bool,
    updated_at: Option<Instant>,
    last_error: Option<QueryError>,
    epoch: u64,
    in_flight: Option<SharedFetch<V>>,
    query_fn: Option<QueryFn<V>>,
    updates: watch::Sender<Option<V>>,
}

impl<V: Clone> Entry<V> {
    fn new() -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            data: None,
            stale: true,
            updated_at: None,
            last_error: None,
            epoch: 0,
            in_flight: None,
            query_fn: None,
            updates,
        }
    }

    fn fresh_data(&self, stale_time: Option<Duration>) -> Option<V> {
        if self.stale {
            return None;
        }
        if let (Some(limit), Some(updated_at)) = (stale_time, self.updated_at)
            && updated_at.elapsed() >= limit
        {
            return None;
        }
        self.data.clone()
    }

    fn is_observed(&self) -> bool {
        self.updates.receiver_count() > 0
    }

    fn set_data(&mut self, data: V) {
        self.data = Some(data.clone());
        self.stale = false;
        self.updated_at = Some(Instant::now());
        self.last_error = None;
        self.updates.send_replace(Some(data));
    }

    fn restore(&mut self, previous: Option<V>) {
        match previous {
            Some(data) => self.set_data(data),
            None => {
                self.data = None;
                self.stale = true;
                self.updates.send_replace(None);
            }
        }
    }

    /// Drop any in-flight fetch; returns whether one was running.
    fn cancel(&mut self) -> bool {
        self.epoch = self.epoch.wrapping_add(1);
        self.in_flight.take().is_some()
    }
}

struct CacheInner<V> {
    entries: Mutex<HashMap<QueryKey, Entry<V>>>,
    options: QueryCacheOptions,
}

impl<V> CacheInner<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, key: &QueryKey, epoch: u64, result: &Result<V, QueryError>) {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        if entry.epoch != epoch {
            debug!(%key, epoch, current = entry.epoch, "discarding superseded fetch");
            return;
        }
        entry.in_flight = None;
        match result {
            Ok(data) => {
                debug!(%key, "query settled");
                entry.set_data(data.clone());
            }
            Err(error) => {
                warn!(%key, %error, "query failed");
                entry.last_error = Some(error.clone());
            }
        }
    }
}

/// Join the entry's in-flight fetch or start a new one.
fn start_fetch<V>(
    inner: &Arc<CacheInner<V>>,
    key: &QueryKey,
    entry: &mut Entry<V>,
) -> Option<SharedFetch<V>>
where
    V: Clone + Send + Sync + 'static,
{
    if let Some(in_flight) = &entry.in_flight {
        debug!(%key, "joining in-flight fetch");
        return Some(in_flight.clone());
    }
    let query_fn = entry.query_fn.clone()?;
    let epoch = entry.epoch;
    let cache = Arc::downgrade(inner);
    let settle_key = key.clone();
    let future = async move {
        let result = query_fn().await;
        if let Some(inner) = cache.upgrade() {
            inner.settle(&settle_key, epoch, &result);
        }
        result
    }
    .boxed()
    .shared();
    debug!(%key, epoch, "starting fetch");
    entry.in_flight = Some(future.clone());
    Some(future)
}

/// Cloneable handle to a shared query cache.
pub struct QueryCache<V> {
    inner: Arc<CacheInner<V>>,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(QueryCacheOptions::default())
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache.
    pub fn new(options: QueryCacheOptions) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: Mutex::new(HashMap::new()),
                options,
            }),
        }
    }

    /// Return fresh data for `key`, fetching with `query_fn` when the entry
    /// is missing or stale.
    ///
    /// Readers arriving while a fetch is in flight wait for that fetch
    /// instead of starting another. `query_fn` is remembered for later
    /// invalidation-driven refetches. When the awaited fetch was superseded
    /// by an optimistic update, the cache's current value wins.
    pub async fn read(&self, key: &QueryKey, query_fn: QueryFn<V>) -> Result<V, QueryError> {
        let pending = {
            let mut entries = self.inner.lock();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.query_fn = Some(query_fn);
            if let Some(data) = entry.fresh_data(self.inner.options.stale_time) {
                debug!(%key, "query cache hit");
                return Ok(data);
            }
            start_fetch(&self.inner, key, entry).map(|fetch| (fetch, entry.epoch))
        };
        let Some((pending, epoch)) = pending else {
            return Err(QueryError::missing_query_fn(key.to_string()));
        };
        match pending.await {
            Ok(fetched) => Ok(self.get_query_data(key).unwrap_or(fetched)),
            Err(error) => self.superseded_data(key, epoch).ok_or(error),
        }
    }

    /// Cached value for `key` when the fetch started at `epoch` was
    /// superseded.
    fn superseded_data(&self, key: &QueryKey, epoch: u64) -> Option<V> {
        self.inner
            .lock()
            .get(key)
            .filter(|entry| entry.epoch != epoch)
            .and_then(|entry| entry.data.clone())
    }

    /// Fetch `key` again with its remembered query function, superseding
    /// any fetch in flight.
    pub async fn refetch(&self, key: &QueryKey) -> Result<V, QueryError> {
        let pending = {
            let mut entries = self.inner.lock();
            entries.get_mut(key).and_then(|entry| {
                entry.cancel();
                start_fetch(&self.inner, key, entry)
            })
        };
        let Some(pending) = pending else {
            return Err(QueryError::missing_query_fn(key.to_string()));
        };
        pending.await
    }

    /// Subscribe to value changes for `key`, marking the entry active.
    pub fn observe(&self, key: &QueryKey) -> QueryObserver<V> {
        let mut entries = self.inner.lock();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        QueryObserver {
            receiver: entry.updates.subscribe(),
        }
    }

    /// Current value for `key` without fetching.
    pub fn get_query_data(&self, key: &QueryKey) -> Option<V> {
        self.inner.lock().get(key).and_then(|entry| entry.data.clone())
    }

    /// Overwrite the value for `key`, marking it fresh.
    pub fn set_query_data(&self, key: &QueryKey, data: V) {
        let mut entries = self.inner.lock();
        entries
            .entry(key.clone())
            .or_insert_with(Entry::new)
            .set_data(data);
    }

    /// Snapshot of the entry behind `key`.
    pub fn state(&self, key: &QueryKey) -> Option<QueryState<V>> {
        let stale_time = self.inner.options.stale_time;
        self.inner.lock().get(key).map(|entry| QueryState {
            data: entry.data.clone(),
            is_stale: entry.fresh_data(stale_time).is_none(),
            is_fetching: entry.in_flight.is_some(),
            last_error: entry.last_error.clone(),
        })
    }

    /// Drop in-flight fetches for `prefix` and its descendants.
    ///
    /// The underlying query functions still run to completion; their results
    /// are discarded. Returns the number of fetches cancelled.
    pub fn cancel(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.inner.lock();
        let mut cancelled = 0;
        for (_, entry) in entries.iter_mut().filter(|(key, _)| key.starts_with(prefix)) {
            if entry.cancel() {
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            debug!(%prefix, cancelled, "cancelled in-flight fetches");
        }
        cancelled
    }

    /// Mark `prefix` and its descendants stale and refetch the active ones.
    ///
    /// Any fetch already in flight for an active entry is superseded so the
    /// refetch observes state written after this call. Waits for the
    /// refetches to settle; failures are recorded on their entries. Returns
    /// the number of refetches performed.
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let pending: Vec<SharedFetch<V>> = {
            let mut entries = self.inner.lock();
            entries
                .iter_mut()
                .filter(|(key, _)| key.starts_with(prefix))
                .filter_map(|(key, entry)| {
                    entry.stale = true;
                    if !entry.is_observed() {
                        return None;
                    }
                    entry.cancel();
                    start_fetch(&self.inner, key, entry)
                })
                .collect()
        };
        let refetched = pending.len();
        debug!(%prefix, refetched, "invalidated queries");
        join_all(pending).await;
        refetched
    }

    /// Apply `update` to the cached value for `key` ahead of a mutation.
    ///
    /// Cancels in-flight fetches under `key`, snapshots the current value,
    /// and writes `update(current)` when a value is cached. The returned
    /// guard restores the snapshot unless it is committed.
    pub fn begin_optimistic<F>(&self, key: &QueryKey, update: F) -> OptimisticUpdate<V>
    where
        F: FnOnce(&V) -> V,
    {
        let mut entries = self.inner.lock();
        for (candidate, entry) in entries.iter_mut() {
            if candidate.starts_with(key) && entry.cancel() {
                debug!(key = %candidate, "cancelled fetch ahead of optimistic update");
            }
        }
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        let previous = entry.data.clone();
        if let Some(current) = &previous {
            entry.set_data(update(current));
        }
        OptimisticUpdate::new(self.clone(), key.clone(), previous)
    }

    fn restore(&self, key: &QueryKey, previous: Option<V>) {
        let mut entries = self.inner.lock();
        if let Some(entry) = entries.get_mut(key) {
            entry.restore(previous);
        }
    }
}

/// Consumer handle receiving every value written to one entry.
pub struct QueryObserver<V> {
    receiver: watch::Receiver<Option<V>>,
}

impl<V: Clone> QueryObserver<V> {
    /// Most recent value, marking it seen.
    pub fn latest(&mut self) -> Option<V> {
        self.receiver.borrow_and_update().clone()
    }

    /// Most recent value without marking it seen.
    pub fn peek(&self) -> Option<V> {
        self.receiver.borrow().clone()
    }

    /// Whether a value arrived since the last [`QueryObserver::latest`].
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next value. Returns `false` once the cache is gone.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests;
