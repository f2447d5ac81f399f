//! Startup seeding of the in-memory store with generated customers.

use example_customers::{ExampleCustomerSeed, GenerationError, generate_example_customers};
use thiserror::Error;
use tracing::info;

use crate::domain::{Amounts, CustomerDraft, CustomerValidationError};
use crate::outbound::InMemoryCustomerStore;
use crate::settings::DashboardSettings;

/// Errors returned while seeding on startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartupSeedingError {
    /// The generator refused the request.
    #[error("example customer generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated record did not map onto the customer model.
    #[error("generated customer is invalid: {0}")]
    Invalid(#[from] CustomerValidationError),
}

/// Seed `store` when enabled, returning how many customers were added.
pub async fn seed_example_customers_on_startup(
    settings: &DashboardSettings,
    store: &InMemoryCustomerStore,
) -> Result<Option<usize>, StartupSeedingError> {
    if !settings.seed_enabled {
        info!(reason = "disabled", "example customer seeding skipped");
        return Ok(None);
    }

    let drafts = generate_example_customers(settings.seed(), settings.customer_count())?
        .into_iter()
        .map(to_draft)
        .collect::<Result<Vec<_>, _>>()?;
    let seeded = store.seed(drafts).await;
    info!(seed = settings.seed(), seeded, "example customers seeded");
    Ok(Some(seeded))
}

fn to_draft(seed: ExampleCustomerSeed) -> Result<CustomerDraft, CustomerValidationError> {
    let status = seed.status.as_str().parse()?;
    Ok(CustomerDraft::new(
        seed.name,
        seed.description,
        status,
        Amounts {
            rate: seed.rate,
            balance: seed.balance,
            deposit: seed.deposit,
        },
    ))
}
