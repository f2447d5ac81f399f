//! Deterministic example customer records for demonstration purposes.
//!
//! This crate generates believable, reproducible billing customers from a
//! numeric seed. It is independent of the dashboard's domain types; callers
//! convert [`ExampleCustomerSeed`] values at the point of use.
//!
//! # Example
//!
//! ```
//! use example_customers::generate_example_customers;
//!
//! let customers = generate_example_customers(42, 3).expect("generation succeeds");
//! assert_eq!(customers.len(), 3);
//!
//! // Same seed, same customers.
//! let again = generate_example_customers(42, 3).expect("generation succeeds");
//! assert_eq!(customers, again);
//! ```

mod error;
mod generator;
mod seed;
mod validation;

pub use error::GenerationError;
pub use generator::{MAX_CUSTOMERS, generate_example_customers};
pub use seed::{ExampleCustomerSeed, StatusSeed};
pub use validation::{DESCRIPTION_MAX, NAME_MIN, is_valid_name};
