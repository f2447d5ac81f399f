//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod customer_store;
mod notifier;

#[cfg(test)]
pub use customer_store::MockCustomerStore;
pub use customer_store::{CustomerStore, CustomerStoreError, FixtureCustomerStore};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{NoOpNotifier, Notification, NotificationLevel, Notifier, NotifierError};
