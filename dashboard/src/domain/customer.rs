//! Customer billing record model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned by the customer constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerValidationError {
    /// Identifier is empty.
    #[error("customer id must not be empty")]
    EmptyId,
    /// Identifier has leading or trailing whitespace.
    #[error("customer id must not contain surrounding whitespace")]
    PaddedId,
    /// Status label is not one of the known payment statuses.
    #[error("unknown payment status: {0}")]
    UnknownStatus(String),
}

/// Stable customer identifier assigned by the store.
///
/// Identifiers produced by the in-memory store are decimal integers, but any
/// non-empty, unpadded string is accepted so records from other sources can
/// round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    /// Validate and construct a [`CustomerId`].
    pub fn new(id: impl Into<String>) -> Result<Self, CustomerValidationError> {
        Self::from_owned(id.into())
    }

    /// Identifier for the given sequence number.
    pub fn from_sequence(value: u64) -> Self {
        Self(value.to_string())
    }

    fn from_owned(id: String) -> Result<Self, CustomerValidationError> {
        if id.is_empty() {
            return Err(CustomerValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(CustomerValidationError::PaddedId);
        }
        Ok(Self(id))
    }

    /// Numeric value of the identifier, when it is a decimal integer.
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CustomerId> for String {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CustomerId {
    type Error = CustomerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Payment status of a customer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Invoice issued, not yet settled.
    Open,
    /// Fully settled.
    Paid,
    /// No longer billed.
    Inactive,
    /// Payment is due.
    Due,
}

impl PaymentStatus {
    /// Every status, in select-option order.
    pub const ALL: [Self; 4] = [Self::Open, Self::Paid, Self::Inactive, Self::Due];

    /// Select-option labels, in the same order as [`PaymentStatus::ALL`].
    pub const LABELS: [&'static str; 4] = ["Open", "Paid", "Inactive", "Due"];

    /// Display label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Paid => "Paid",
            Self::Inactive => "Inactive",
            Self::Due => "Due",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = CustomerValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| CustomerValidationError::UnknownStatus(value.to_owned()))
    }
}

/// How a customer's balance reads on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStanding {
    /// Negative balance: the customer owes money.
    Owing,
    /// Zero balance.
    Settled,
    /// Positive balance: the customer is in credit.
    Credit,
}

/// Customer fields without an identifier; the input to `add`.
///
/// ## Invariants
/// - `name` has at least two characters once trimmed.
/// - `description` has at most 500 characters.
/// - `rate` and `deposit` are finite and non-negative; `balance` is finite.
///
/// Drafts built by the form validator uphold these; [`CustomerDraft::new`]
/// trusts its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    /// Display name.
    pub name: String,
    /// Optional free text; empty when absent.
    pub description: String,
    /// Payment status.
    pub status: PaymentStatus,
    /// Billing rate.
    pub rate: f64,
    /// Signed balance; negative means the customer owes.
    pub balance: f64,
    /// Deposit held.
    pub deposit: f64,
}

impl CustomerDraft {
    /// Assemble a draft from already validated parts.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        status: PaymentStatus,
        amounts: Amounts,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status,
            rate: amounts.rate,
            balance: amounts.balance,
            deposit: amounts.deposit,
        }
    }

    /// Attach an identifier, producing a stored record.
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            rate: self.rate,
            balance: self.balance,
            deposit: self.deposit,
        }
    }
}

/// Monetary fields of a customer, grouped for constructors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Amounts {
    /// Billing rate.
    pub rate: f64,
    /// Signed balance.
    pub balance: f64,
    /// Deposit held.
    pub deposit: f64,
}

/// A billable party as held by the store.
///
/// ## Invariants
/// - `id` is assigned by the store at creation and never changes.
/// - The remaining fields follow [`CustomerDraft`]'s invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Store-assigned identifier.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Optional free text; empty when absent.
    pub description: String,
    /// Payment status.
    pub status: PaymentStatus,
    /// Billing rate.
    pub rate: f64,
    /// Signed balance; negative means the customer owes.
    pub balance: f64,
    /// Deposit held.
    pub deposit: f64,
}

impl Customer {
    /// Replace every field but the identifier with the draft's values.
    pub fn revised(&self, draft: CustomerDraft) -> Self {
        draft.with_id(self.id.clone())
    }

    /// Fields without the identifier.
    pub fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            rate: self.rate,
            balance: self.balance,
            deposit: self.deposit,
        }
    }

    /// Whether the customer owes money, is settled, or is in credit.
    pub fn balance_standing(&self) -> BalanceStanding {
        if self.balance < 0.0 {
            BalanceStanding::Owing
        } else if self.balance > 0.0 {
            BalanceStanding::Credit
        } else {
            BalanceStanding::Settled
        }
    }
}
