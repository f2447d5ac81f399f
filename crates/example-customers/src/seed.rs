//! Generated customer seed types.
//!
//! These types are independent of the dashboard's domain types to avoid a
//! dependency cycle.

use serde::{Deserialize, Serialize};

/// Payment status for a generated customer.
///
/// Mirrors the dashboard's `PaymentStatus` enum without creating a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusSeed {
    /// Invoice issued, not yet settled.
    #[default]
    Open,
    /// Fully settled.
    Paid,
    /// No longer billed.
    Inactive,
    /// Payment is due.
    Due,
}

impl StatusSeed {
    /// Every status, in select-option order.
    pub const ALL: [Self; 4] = [Self::Open, Self::Paid, Self::Inactive, Self::Due];

    /// Label used by the dashboard for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Paid => "Paid",
            Self::Inactive => "Inactive",
            Self::Due => "Due",
        }
    }
}

/// A generated example customer without an identifier.
///
/// The dashboard's store assigns identifiers when the seed is inserted.
///
/// # Example
///
/// ```
/// use example_customers::{ExampleCustomerSeed, StatusSeed};
///
/// let customer = ExampleCustomerSeed {
///     name: "Ann Culhane".to_owned(),
///     description: "Web development retainer".to_owned(),
///     status: StatusSeed::Open,
///     rate: 70.0,
///     balance: -270.0,
///     deposit: 500.0,
/// };
///
/// assert_eq!(customer.status.as_str(), "Open");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleCustomerSeed {
    /// Display name, at least [`crate::NAME_MIN`] characters once trimmed.
    pub name: String,
    /// Free-text description, at most [`crate::DESCRIPTION_MAX`] characters.
    pub description: String,
    /// Payment status.
    pub status: StatusSeed,
    /// Hourly rate, never negative.
    pub rate: f64,
    /// Signed balance; negative means the customer owes money.
    pub balance: f64,
    /// Deposit held, never negative.
    pub deposit: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_seed_defaults_to_open() {
        assert_eq!(StatusSeed::default(), StatusSeed::Open);
    }

    #[test]
    fn status_seed_serializes_as_label() {
        for status in StatusSeed::ALL {
            let json = serde_json::to_string(&status).expect("serialize");
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn example_customer_seed_serializes_to_camel_case() {
        let customer = ExampleCustomerSeed {
            name: "Test".to_owned(),
            description: String::new(),
            status: StatusSeed::Due,
            rate: 0.0,
            balance: 0.0,
            deposit: 0.0,
        };
        let json = serde_json::to_value(&customer).expect("serialize");
        assert_eq!(json["status"], "Due");
        assert!(json.get("deposit").is_some());
    }
}
