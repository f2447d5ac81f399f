//! Deterministic customer generation from a numeric seed.
//!
//! The same seed value always produces identical output.

use fake::Fake;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::seed::{ExampleCustomerSeed, StatusSeed};
use crate::validation::{is_valid_name, truncate_description};

/// Upper bound on the number of customers generated in one call.
pub const MAX_CUSTOMERS: usize = 10_000;

/// Maximum number of attempts to generate a valid name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Rates are whole multiples of this amount.
const RATE_STEP: i32 = 5;

/// Rate range, in multiples of [`RATE_STEP`].
const RATE_STEPS: std::ops::RangeInclusive<i32> = 8..=24;

/// Balance range in cents; negative balances are amounts owed.
const BALANCE_CENTS: std::ops::RangeInclusive<i32> = -50_000..=70_000;

/// Deposits are whole multiples of this amount.
const DEPOSIT_STEP: i32 = 50;

/// Deposit range, in multiples of [`DEPOSIT_STEP`].
const DEPOSIT_STEPS: std::ops::RangeInclusive<i32> = 0..=20;

/// Generates `count` example customers from `seed`.
///
/// The generated customers have:
///
/// - Names built from first and last names, valid for the dashboard form
/// - A short lorem description
/// - A uniformly chosen payment status
/// - A non-negative rate and deposit, and a signed balance with cent precision
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - `count` exceeds [`MAX_CUSTOMERS`]
/// - Name generation fails after maximum retries
///
/// # Example
///
/// ```
/// use example_customers::generate_example_customers;
///
/// let customers = generate_example_customers(7, 5).expect("generated");
/// assert!(customers.iter().all(|c| c.rate >= 0.0 && c.deposit >= 0.0));
/// ```
pub fn generate_example_customers(
    seed: u64,
    count: usize,
) -> Result<Vec<ExampleCustomerSeed>, GenerationError> {
    if count > MAX_CUSTOMERS {
        return Err(GenerationError::TooManyCustomers {
            requested: count,
            max: MAX_CUSTOMERS,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut customers = Vec::with_capacity(count);

    for _ in 0..count {
        customers.push(generate_single_customer(&mut rng)?);
    }

    Ok(customers)
}

#[expect(
    clippy::float_arithmetic,
    reason = "balances are drawn in whole cents and scaled to dollars"
)]
fn generate_single_customer(rng: &mut ChaCha8Rng) -> Result<ExampleCustomerSeed, GenerationError> {
    let name = generate_name(rng)?;
    let sentence: String = Sentence(EN, 4..9).fake_with_rng(rng);
    let status = StatusSeed::ALL.choose(rng).copied().unwrap_or_default();

    let rate = f64::from(rng.random_range(RATE_STEPS) * RATE_STEP);
    let balance = f64::from(rng.random_range(BALANCE_CENTS)) / 100.0;
    let deposit = f64::from(rng.random_range(DEPOSIT_STEPS) * DEPOSIT_STEP);

    Ok(ExampleCustomerSeed {
        name,
        description: truncate_description(&sentence),
        status,
        rate,
        balance,
        deposit,
    })
}

fn generate_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate = format!("{first} {last}");

        if is_valid_name(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}
