//! Fetch de-duplication, invalidation, and optimistic rollback coverage.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use futures_util::FutureExt;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::CustomerKeys;

const FETCH_DELAY: Duration = Duration::from_millis(100);

/// Query function returning how many times it has been called.
fn counting_query(calls: &Arc<AtomicU32>) -> QueryFn<u32> {
    let calls = Arc::clone(calls);
    Arc::new(move || -> QueryFuture<u32> {
        let calls = Arc::clone(&calls);
        async move {
            tokio::time::sleep(FETCH_DELAY).await;
            Ok(calls.fetch_add(1, Ordering::SeqCst) + 1)
        }
        .boxed()
    })
}

fn failing_query(message: &'static str) -> QueryFn<u32> {
    Arc::new(move || -> QueryFuture<u32> { async move { Err(QueryError::fetch(message)) }.boxed() })
}

fn slow_failing_query(message: &'static str) -> QueryFn<u32> {
    Arc::new(move || -> QueryFuture<u32> {
        async move {
            tokio::time::sleep(FETCH_DELAY).await;
            Err(QueryError::fetch(message))
        }
        .boxed()
    })
}

#[fixture]
fn cache() -> QueryCache<u32> {
    QueryCache::default()
}

#[fixture]
fn calls() -> Arc<AtomicU32> {
    Arc::new(AtomicU32::new(0))
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn read_fetches_once_then_serves_cached_data(cache: QueryCache<u32>, calls: Arc<AtomicU32>) {
    let key = CustomerKeys::lists();

    assert_eq!(cache.read(&key, counting_query(&calls)).await, Ok(1));
    assert_eq!(cache.read(&key, counting_query(&calls)).await, Ok(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn concurrent_reads_share_one_fetch(cache: QueryCache<u32>, calls: Arc<AtomicU32>) {
    let key = CustomerKeys::lists();

    let (first, second) = tokio::join!(
        cache.read(&key, counting_query(&calls)),
        cache.read(&key, counting_query(&calls)),
    );

    assert_eq!(first, Ok(1));
    assert_eq!(second, Ok(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn state_reports_fetch_in_progress(cache: QueryCache<u32>, calls: Arc<AtomicU32>) {
    let key = CustomerKeys::lists();
    let reader = cache.clone();
    let read_key = key.clone();
    let query = counting_query(&calls);
    let handle = tokio::spawn(async move { reader.read(&read_key, query).await });
    tokio::task::yield_now().await;

    let loading = cache.state(&key).expect("entry exists");
    assert!(loading.is_fetching);
    assert_eq!(loading.data, None);

    handle.await.expect("join reader").expect("read succeeds");
    let loaded = cache.state(&key).expect("entry exists");
    assert!(!loaded.is_fetching);
    assert!(!loaded.is_stale);
    assert_eq!(loaded.data, Some(1));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn invalidate_marks_unobserved_entries_stale_without_refetching(
    cache: QueryCache<u32>,
    calls: Arc<AtomicU32>,
) {
    let key = CustomerKeys::lists();
    cache.read(&key, counting_query(&calls)).await.expect("read");

    assert_eq!(cache.invalidate(&CustomerKeys::all()).await, 0);
    let state = cache.state(&key).expect("entry exists");
    assert!(state.is_stale);
    assert_eq!(state.data, Some(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(cache.read(&key, counting_query(&calls)).await, Ok(2));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn invalidate_refetches_observed_entries(cache: QueryCache<u32>, calls: Arc<AtomicU32>) {
    let key = CustomerKeys::lists();
    let mut observer = cache.observe(&key);
    cache.read(&key, counting_query(&calls)).await.expect("read");
    assert_eq!(observer.latest(), Some(1));

    assert_eq!(cache.invalidate(&CustomerKeys::all()).await, 1);

    assert!(observer.has_changed());
    assert_eq!(observer.latest(), Some(2));
    assert_eq!(cache.get_query_data(&key), Some(2));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn invalidate_leaves_unrelated_keys_fresh(cache: QueryCache<u32>) {
    let invoices = QueryKey::new("invoices").expect("valid key");
    cache.set_query_data(&invoices, 9);

    cache.invalidate(&CustomerKeys::all()).await;

    let state = cache.state(&invoices).expect("entry exists");
    assert!(!state.is_stale);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_previous_data(cache: QueryCache<u32>) {
    let key = CustomerKeys::lists();
    let _observer = cache.observe(&key);
    cache.set_query_data(&key, 4);
    cache.invalidate(&key).await;

    let err = cache
        .read(&key, failing_query("store offline"))
        .await
        .expect_err("fetch fails");
    assert_eq!(err, QueryError::fetch("store offline"));

    let state = cache.state(&key).expect("entry exists");
    assert_eq!(state.data, Some(4));
    assert_eq!(state.last_error, Some(QueryError::fetch("store offline")));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn stale_time_expires_data(calls: Arc<AtomicU32>) {
    let cache = QueryCache::new(QueryCacheOptions {
        stale_time: Some(Duration::from_secs(5)),
    });
    let key = CustomerKeys::lists();
    cache.read(&key, counting_query(&calls)).await.expect("read");

    tokio::time::advance(Duration::from_secs(4)).await;
    assert_eq!(cache.read(&key, counting_query(&calls)).await, Ok(1));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(cache.read(&key, counting_query(&calls)).await, Ok(2));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn refetch_requires_a_known_query(cache: QueryCache<u32>, calls: Arc<AtomicU32>) {
    let key = CustomerKeys::lists();
    let err = cache.refetch(&key).await.expect_err("nothing to refetch");
    assert_eq!(err, QueryError::missing_query_fn("customers:list"));

    cache.read(&key, counting_query(&calls)).await.expect("read");
    assert_eq!(cache.refetch(&key).await, Ok(2));
}

#[rstest]
fn optimistic_update_applies_immediately_and_rolls_back(cache: QueryCache<u32>) {
    let key = CustomerKeys::lists();
    cache.set_query_data(&key, 10);

    let update = cache.begin_optimistic(&key, |current| current + 1);
    assert_eq!(update.snapshot(), Some(&10));
    assert_eq!(cache.get_query_data(&key), Some(11));

    update.rollback();
    assert_eq!(cache.get_query_data(&key), Some(10));
}

#[rstest]
fn committed_optimistic_update_sticks(cache: QueryCache<u32>) {
    let key = CustomerKeys::lists();
    cache.set_query_data(&key, 10);

    cache.begin_optimistic(&key, |current| current * 2).commit();
    assert_eq!(cache.get_query_data(&key), Some(20));
}

#[rstest]
fn dropped_optimistic_update_rolls_back(cache: QueryCache<u32>) {
    let key = CustomerKeys::lists();
    cache.set_query_data(&key, 10);

    {
        let _update = cache.begin_optimistic(&key, |_| 0);
        assert_eq!(cache.get_query_data(&key), Some(0));
    }
    assert_eq!(cache.get_query_data(&key), Some(10));
}

#[rstest]
fn optimistic_update_on_empty_entry_is_a_no_op(cache: QueryCache<u32>) {
    let key = CustomerKeys::lists();
    let update = cache.begin_optimistic(&key, |current| current + 1);
    assert_eq!(update.snapshot(), None);
    assert_eq!(cache.get_query_data(&key), None);
    update.rollback();
    assert_eq!(cache.get_query_data(&key), None);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn optimistic_update_cancels_in_flight_fetch(cache: QueryCache<u32>, calls: Arc<AtomicU32>) {
    let key = CustomerKeys::lists();
    cache.set_query_data(&key, 50);
    cache.invalidate(&key).await;

    let reader = cache.clone();
    let read_key = key.clone();
    let query = counting_query(&calls);
    let handle = tokio::spawn(async move { reader.read(&read_key, query).await });
    tokio::task::yield_now().await;
    assert!(cache.state(&key).expect("entry exists").is_fetching);

    let update = cache.begin_optimistic(&key, |current| current - 1);
    assert!(!cache.state(&key).expect("entry exists").is_fetching);

    let read = handle.await.expect("join reader");
    assert_eq!(read, Ok(49), "superseded read returns the optimistic value");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.get_query_data(&key), Some(49));

    update.commit();
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn observer_sees_optimistic_value_and_rollback(cache: QueryCache<u32>) {
    let key = CustomerKeys::lists();
    cache.set_query_data(&key, 3);
    let mut observer = cache.observe(&key);
    assert_eq!(observer.latest(), Some(3));

    let update = cache.begin_optimistic(&key, |_| 7);
    assert!(observer.changed().await);
    assert_eq!(observer.latest(), Some(7));

    update.rollback();
    assert!(observer.changed().await);
    assert_eq!(observer.latest(), Some(3));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancel_discards_in_flight_fetch(cache: QueryCache<u32>, calls: Arc<AtomicU32>) {
    let key = CustomerKeys::lists();
    let reader = cache.clone();
    let read_key = key.clone();
    let query = counting_query(&calls);
    let handle = tokio::spawn(async move { reader.read(&read_key, query).await });
    tokio::task::yield_now().await;
    assert!(cache.state(&key).expect("entry exists").is_fetching);

    assert_eq!(cache.cancel(&CustomerKeys::all()), 1);
    assert!(!cache.state(&key).expect("entry exists").is_fetching);
    assert_eq!(cache.cancel(&CustomerKeys::all()), 0);

    handle.await.expect("join reader").expect("query still completes");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let settled = cache.state(&key).expect("entry exists");
    assert_eq!(settled.data, None);
    assert!(!settled.is_fetching);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn superseded_failed_read_returns_optimistic_value(cache: QueryCache<u32>) {
    let key = CustomerKeys::lists();
    cache.set_query_data(&key, 5);
    cache.invalidate(&key).await;

    let reader = cache.clone();
    let read_key = key.clone();
    let handle = tokio::spawn(async move { reader.read(&read_key, slow_failing_query("down")).await });
    tokio::task::yield_now().await;

    let update = cache.begin_optimistic(&key, |current| current + 1);
    let read = handle.await.expect("join reader");
    assert_eq!(read, Ok(6));
    assert_eq!(cache.state(&key).expect("entry exists").last_error, None);

    update.commit();
}
