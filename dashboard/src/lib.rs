//! Customer payments dashboard core.
//!
//! The crate models a billing dashboard without a rendering layer: a
//! customer store behind a port, a query cache with optimistic updates and
//! rollback, the table and modal state a UI renders from, and the customer
//! form's schema and validator. [`session::DashboardSession`] ties them
//! together for one user.

pub mod domain;
pub mod example_data;
pub mod outbound;
pub mod session;
pub mod settings;
