//! Domain primitives, services, and client-side state.
//!
//! Purpose: define the customer model, the ports the store and notifier
//! adapters implement, the query cache that mediates every read and
//! mutation, and the pure UI and form state the session drives.
//!
//! Public surface:
//! - Customer, CustomerDraft, CustomerId, PaymentStatus: the billing record.
//! - Error, ErrorCode: transport-agnostic failures.
//! - QueryKey, CustomerKeys: hierarchical cache keys.
//! - CustomerService, MutationOutcome: mutations with optimistic rollback.

pub mod customer;
pub mod customer_service;
pub mod error;
pub mod form;
pub mod ports;
pub mod query_cache;
pub mod query_key;
pub mod ui_state;

pub use self::customer::{
    Amounts, BalanceStanding, Customer, CustomerDraft, CustomerId, CustomerValidationError,
    PaymentStatus,
};
pub use self::customer_service::{CustomerService, MutationOutcome};
pub use self::error::{Error, ErrorCode};
pub use self::query_key::{CustomerKeys, QueryKey, QueryKeyValidationError};
