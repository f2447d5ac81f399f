//! Customer mutation service.
//!
//! Routes every read and mutation of the customer list through the query
//! cache so consumers observe optimistic changes immediately and converge on
//! the store's state once the follow-up refetch settles. Store failures are
//! converted into rollbacks plus an error notification and never escape as
//! `Err`.

use std::sync::Arc;

use futures_util::FutureExt;
use tracing::{info, warn};

use crate::domain::ports::{CustomerStore, CustomerStoreError, Notification, Notifier};
use crate::domain::query_cache::{QueryCache, QueryError, QueryFn, QueryFuture, QueryObserver};
use crate::domain::{Customer, CustomerDraft, CustomerId, CustomerKeys, Error};

/// Settlement of one mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    /// The store accepted the mutation.
    Committed(T),
    /// The store rejected the mutation and cached data was restored.
    RolledBack(Error),
}

impl<T> MutationOutcome<T> {
    /// Whether the store accepted the mutation.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// Convert into a `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Committed(value) => Ok(value),
            Self::RolledBack(error) => Err(error),
        }
    }
}

/// Customer mutations over a store, a notifier, and the shared list cache.
pub struct CustomerService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    cache: QueryCache<Vec<Customer>>,
}

impl<S, N> Clone for CustomerService<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
            cache: self.cache.clone(),
        }
    }
}

impl<S, N> CustomerService<S, N> {
    /// Create a new service with the given store, notifier, and cache.
    pub fn new(store: Arc<S>, notifier: Arc<N>, cache: QueryCache<Vec<Customer>>) -> Self {
        Self {
            store,
            notifier,
            cache,
        }
    }

    /// Cache holding the customer list.
    pub fn cache(&self) -> &QueryCache<Vec<Customer>> {
        &self.cache
    }
}

impl<S, N> CustomerService<S, N>
where
    S: CustomerStore + 'static,
    N: Notifier,
{
    fn map_store_error(error: CustomerStoreError) -> Error {
        match error {
            CustomerStoreError::Unavailable { message } => {
                Error::service_unavailable(format!("customer store unavailable: {message}"))
            }
            CustomerStoreError::NotFound { id } => {
                Error::not_found(format!("customer {id} not found"))
            }
            CustomerStoreError::Rejected { message } => Error::invalid_request(message),
        }
    }

    fn map_query_error(error: QueryError) -> Error {
        match error {
            QueryError::Fetch { message } => Error::service_unavailable(message),
            QueryError::MissingQueryFn { key } => {
                Error::internal(format!("no query registered for {key}"))
            }
        }
    }

    fn list_query(&self) -> QueryFn<Vec<Customer>> {
        let store = Arc::clone(&self.store);
        Arc::new(move || -> QueryFuture<Vec<Customer>> {
            let store = Arc::clone(&store);
            async move {
                store
                    .get_all()
                    .await
                    .map_err(|err| QueryError::fetch(err.to_string()))
            }
            .boxed()
        })
    }

    async fn notify(&self, notification: Notification) {
        if let Err(error) = self.notifier.notify(notification).await {
            warn!(%error, "failed to deliver notification");
        }
    }

    /// Current customer list, fetched through the cache.
    pub async fn customers(&self) -> Result<Vec<Customer>, Error> {
        self.cache
            .read(&CustomerKeys::lists(), self.list_query())
            .await
            .map_err(Self::map_query_error)
    }

    /// Subscribe to the cached customer list.
    pub fn observe(&self) -> QueryObserver<Vec<Customer>> {
        self.cache.observe(&CustomerKeys::lists())
    }

    /// Add a customer. The list is refetched only when the store accepts it.
    pub async fn create(&self, draft: CustomerDraft) -> MutationOutcome<Customer> {
        match self.store.add(&draft).await {
            Ok(customer) => {
                info!(id = %customer.id, "customer created");
                self.notify(Notification::success("Customer added successfully"))
                    .await;
                self.cache.invalidate(&CustomerKeys::lists()).await;
                MutationOutcome::Committed(customer)
            }
            Err(err) => {
                let error = Self::map_store_error(err);
                warn!(%error, "customer creation failed");
                self.notify(Notification::error(error.message())).await;
                MutationOutcome::RolledBack(error)
            }
        }
    }

    /// Replace a customer, applying the change to the cached list first.
    pub async fn update(&self, customer: Customer) -> MutationOutcome<Customer> {
        let key = CustomerKeys::lists();
        let pending = self
            .cache
            .begin_optimistic(&key, |rows| replace_by_id(rows, &customer));
        let outcome = match self.store.update(&customer).await {
            Ok(saved) => {
                pending.commit();
                info!(id = %saved.id, "customer updated");
                self.notify(Notification::success("Customer updated successfully"))
                    .await;
                MutationOutcome::Committed(saved)
            }
            Err(err) => {
                pending.rollback();
                let error = Self::map_store_error(err);
                warn!(id = %customer.id, %error, "customer update rolled back");
                self.notify(Notification::error(error.message())).await;
                MutationOutcome::RolledBack(error)
            }
        };
        self.cache.invalidate(&key).await;
        outcome
    }

    /// Delete customers by identifier, removing them from the cached list
    /// first. Returns how many identifiers were submitted.
    pub async fn delete(&self, ids: &[CustomerId]) -> MutationOutcome<usize> {
        let key = CustomerKeys::lists();
        let pending = self
            .cache
            .begin_optimistic(&key, |rows| without_ids(rows, ids));
        let outcome = match self.store.delete(ids).await {
            Ok(()) => {
                pending.commit();
                info!(count = ids.len(), "customers deleted");
                self.notify(Notification::success(deleted_message(ids.len())))
                    .await;
                MutationOutcome::Committed(ids.len())
            }
            Err(err) => {
                pending.rollback();
                let error = Self::map_store_error(err);
                warn!(count = ids.len(), %error, "customer deletion rolled back");
                self.notify(Notification::error(error.message())).await;
                MutationOutcome::RolledBack(error)
            }
        };
        self.cache.invalidate(&key).await;
        outcome
    }
}

fn replace_by_id(rows: &[Customer], customer: &Customer) -> Vec<Customer> {
    rows.iter()
        .map(|row| {
            if row.id == customer.id {
                customer.clone()
            } else {
                row.clone()
            }
        })
        .collect()
}

fn without_ids(rows: &[Customer], ids: &[CustomerId]) -> Vec<Customer> {
    rows.iter()
        .filter(|row| !ids.contains(&row.id))
        .cloned()
        .collect()
}

fn deleted_message(count: usize) -> String {
    if count == 1 {
        "1 customer deleted".to_owned()
    } else {
        format!("{count} customers deleted")
    }
}

#[cfg(test)]
#[path = "customer_service_tests.rs"]
mod tests;
