//! In-memory customer store with simulated network latency.
//!
//! Every operation sleeps for the configured latency before touching the
//! collection, then completes its read-modify-write under one write guard so
//! concurrent callers never interleave inside an operation.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::ports::{CustomerStore, CustomerStoreError};
use crate::domain::{Customer, CustomerDraft, CustomerId};

/// How `update` treats an identifier the store does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingRecordPolicy {
    /// Leave the collection unchanged, echo the input, and log a warning.
    #[default]
    Ignore,
    /// Fail with [`CustomerStoreError::NotFound`].
    Reject,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown missing record policy: {0} (expected \"ignore\" or \"reject\")")]
pub struct ParseMissingRecordPolicyError(String);

impl FromStr for MissingRecordPolicy {
    type Err = ParseMissingRecordPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseMissingRecordPolicyError(value.to_owned())),
        }
    }
}

/// Simulated latency per operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLatency {
    /// Delay before `get_all` returns.
    pub read: Duration,
    /// Delay before `add`, `update`, or `delete` apply.
    pub write: Duration,
}

impl StoreLatency {
    /// Default read delay.
    pub const DEFAULT_READ: Duration = Duration::from_millis(800);
    /// Default write delay.
    pub const DEFAULT_WRITE: Duration = Duration::from_millis(500);

    /// No delay at all.
    pub const fn none() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
        }
    }
}

impl Default for StoreLatency {
    fn default() -> Self {
        Self {
            read: Self::DEFAULT_READ,
            write: Self::DEFAULT_WRITE,
        }
    }
}

/// Shared in-process customer collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<Vec<Customer>>>,
    latency: StoreLatency,
    missing_record_policy: MissingRecordPolicy,
}

impl InMemoryCustomerStore {
    /// Empty store.
    pub fn new(latency: StoreLatency, missing_record_policy: MissingRecordPolicy) -> Self {
        Self {
            customers: Arc::new(RwLock::new(Vec::new())),
            latency,
            missing_record_policy,
        }
    }

    /// Replace the initial collection.
    #[must_use]
    pub fn with_customers(self, customers: Vec<Customer>) -> Self {
        Self {
            customers: Arc::new(RwLock::new(customers)),
            ..self
        }
    }

    /// Append drafts without latency, assigning identifiers as `add` does.
    pub async fn seed(&self, drafts: impl IntoIterator<Item = CustomerDraft>) -> usize {
        let mut customers = self.customers.write().await;
        let mut seeded = 0;
        for draft in drafts {
            let id = next_id(&customers);
            customers.push(draft.with_id(id));
            seeded += 1;
        }
        debug!(seeded, "seeded customer store");
        seeded
    }

    async fn simulate(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// One past the largest numeric identifier, or `1` for an empty store.
fn next_id(customers: &[Customer]) -> CustomerId {
    let max = customers
        .iter()
        .filter_map(|customer| customer.id.sequence())
        .max()
        .unwrap_or(0);
    CustomerId::from_sequence(max.saturating_add(1))
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn get_all(&self) -> Result<Vec<Customer>, CustomerStoreError> {
        self.simulate(self.latency.read).await;
        Ok(self.customers.read().await.clone())
    }

    async fn add(&self, draft: &CustomerDraft) -> Result<Customer, CustomerStoreError> {
        self.simulate(self.latency.write).await;
        let mut customers = self.customers.write().await;
        let customer = draft.clone().with_id(next_id(&customers));
        customers.push(customer.clone());
        info!(id = %customer.id, "customer added to store");
        Ok(customer)
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, CustomerStoreError> {
        self.simulate(self.latency.write).await;
        let mut customers = self.customers.write().await;
        if let Some(slot) = customers.iter_mut().find(|row| row.id == customer.id) {
            *slot = customer.clone();
            return Ok(customer.clone());
        }
        match self.missing_record_policy {
            MissingRecordPolicy::Ignore => {
                warn!(id = %customer.id, "update ignored: no customer with this id");
                Ok(customer.clone())
            }
            MissingRecordPolicy::Reject => Err(CustomerStoreError::not_found(customer.id.as_str())),
        }
    }

    async fn delete(&self, ids: &[CustomerId]) -> Result<(), CustomerStoreError> {
        self.simulate(self.latency.write).await;
        let mut customers = self.customers.write().await;
        let before = customers.len();
        customers.retain(|customer| !ids.contains(&customer.id));
        debug!(requested = ids.len(), removed = before - customers.len(), "customers removed");
        Ok(())
    }
}
