//! Outbound adapters implementing domain ports.
//!
//! - **memory_store**: in-process customer collection with simulated latency
//! - **notifications**: log-backed and recording notifiers
//!
//! Adapters translate between the ports and their backing resource and hold
//! no business logic.

pub mod memory_store;
pub mod notifications;

pub use memory_store::{
    InMemoryCustomerStore, MissingRecordPolicy, ParseMissingRecordPolicyError, StoreLatency,
};
pub use notifications::{RecordingNotifier, TracingNotifier};
