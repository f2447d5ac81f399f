//! Port for the customer record store and its errors.
//!
//! The store is the authoritative source for customer records. Adapters may
//! be in-memory mocks or network clients; either way every operation is
//! asynchronous and may fail, so callers treat failures as recoverable.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerDraft, CustomerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer store adapters.
    pub enum CustomerStoreError {
        /// Store could not be reached.
        Unavailable { message: String } => "customer store unavailable: {message}",
        /// Update targeted an identifier the store does not hold.
        NotFound { id: String } => "customer {id} not found",
        /// Store refused the mutation.
        Rejected { message: String } => "customer store rejected the request: {message}",
    }
}

/// Port for reading and mutating customer records.
///
/// # Identifier Semantics
///
/// - `add` assigns the identifier; drafts never carry one.
/// - `update` replaces the record whose identifier matches, wholesale.
/// - `delete` removes every listed identifier; absent ones are ignored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Snapshot of every customer, in insertion order.
    async fn get_all(&self) -> Result<Vec<Customer>, CustomerStoreError>;

    /// Insert a new customer and return it with its assigned identifier.
    async fn add(&self, draft: &CustomerDraft) -> Result<Customer, CustomerStoreError>;

    /// Replace the customer with the same identifier.
    ///
    /// Adapters decide how to treat a missing identifier; see
    /// [`crate::outbound::MissingRecordPolicy`].
    async fn update(&self, customer: &Customer) -> Result<Customer, CustomerStoreError>;

    /// Remove every customer whose identifier is listed.
    async fn delete(&self, ids: &[CustomerId]) -> Result<(), CustomerStoreError>;
}

/// Fixture store for tests where store behaviour is not under test.
///
/// Always empty; `add` echoes the draft back with identifier `"1"`, and
/// every other mutation succeeds without effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCustomerStore;

#[async_trait]
impl CustomerStore for FixtureCustomerStore {
    async fn get_all(&self) -> Result<Vec<Customer>, CustomerStoreError> {
        Ok(Vec::new())
    }

    async fn add(&self, draft: &CustomerDraft) -> Result<Customer, CustomerStoreError> {
        Ok(draft.clone().with_id(CustomerId::from_sequence(1)))
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, CustomerStoreError> {
        Ok(customer.clone())
    }

    async fn delete(&self, _ids: &[CustomerId]) -> Result<(), CustomerStoreError> {
        Ok(())
    }
}
