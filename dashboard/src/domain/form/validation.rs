//! Field-level validation for the customer form.
//!
//! Pure and synchronous. Each field validates its raw text independently;
//! [`validate`] runs every rule and assembles a [`CustomerDraft`] only when
//! all of them pass, so invalid input never reaches the store.

use std::collections::BTreeMap;
use std::fmt;

use example_customers::{DESCRIPTION_MAX, NAME_MIN};
use serde::Serialize;
use thiserror::Error;

use super::schema::{FieldKind, FieldName, descriptor};
use crate::domain::{CustomerDraft, PaymentStatus};

/// Raw text of every form field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    /// Name input.
    pub name: String,
    /// Description input.
    pub description: String,
    /// Selected status label; empty when nothing is selected.
    pub status: String,
    /// Rate input.
    pub rate: String,
    /// Balance input.
    pub balance: String,
    /// Deposit input.
    pub deposit: String,
}

impl FormValues {
    /// Raw text of one field.
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::Name => &self.name,
            FieldName::Description => &self.description,
            FieldName::Status => &self.status,
            FieldName::Rate => &self.rate,
            FieldName::Balance => &self.balance,
            FieldName::Deposit => &self.deposit,
        }
    }

    /// Replace one field's text.
    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        let slot = match name {
            FieldName::Name => &mut self.name,
            FieldName::Description => &mut self.description,
            FieldName::Status => &mut self.status,
            FieldName::Rate => &mut self.rate,
            FieldName::Balance => &mut self.balance,
            FieldName::Deposit => &mut self.deposit,
        };
        *slot = value.into();
    }

    /// Values prefilled from an existing record.
    pub fn from_draft(draft: &CustomerDraft) -> Self {
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            status: draft.status.to_string(),
            rate: draft.rate.to_string(),
            balance: draft.balance.to_string(),
            deposit: draft.deposit.to_string(),
        }
    }
}

/// Why one field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A required field is blank.
    #[error("{} is required", .0.label())]
    Required(FieldName),
    /// Name is shorter than the minimum once trimmed.
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    /// Description exceeds the maximum length.
    #[error("Description is too long")]
    DescriptionTooLong,
    /// Status is not one of the select options.
    #[error("Status must be one of: Open, Paid, Inactive, Due")]
    UnknownStatus,
    /// Number field does not hold a finite number.
    #[error("{} must be a number", .0.label())]
    NotANumber(FieldName),
    /// Number field holds a negative value where only non-negative ones are
    /// allowed.
    #[error("{} cannot be negative", .0.label())]
    Negative(FieldName),
}

/// Errors keyed by field, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<FieldName, FieldError>);

impl FieldErrors {
    /// Error for one field.
    pub fn get(&self, name: FieldName) -> Option<FieldError> {
        self.0.get(&name).copied()
    }

    /// Whether no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failing fields with their errors, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, FieldError)> + '_ {
        self.0.iter().map(|(name, error)| (*name, *error))
    }

    pub(super) fn set(&mut self, name: FieldName, error: Option<FieldError>) {
        match error {
            Some(error) => self.0.insert(name, error),
            None => self.0.remove(&name),
        };
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{name}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validate one field's raw text.
pub fn validate_field(name: FieldName, raw: &str) -> Option<FieldError> {
    match descriptor(name).kind {
        FieldKind::Number => parse_number(name, raw).err(),
        FieldKind::Select { .. } => parse_status(raw).err(),
        FieldKind::Text | FieldKind::TextArea => validate_text(name, raw),
    }
}

fn validate_text(name: FieldName, raw: &str) -> Option<FieldError> {
    match name {
        FieldName::Name => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Some(FieldError::Required(name))
            } else if trimmed.chars().count() < NAME_MIN {
                Some(FieldError::NameTooShort)
            } else {
                None
            }
        }
        FieldName::Description => {
            (raw.chars().count() > DESCRIPTION_MAX).then_some(FieldError::DescriptionTooLong)
        }
        FieldName::Status | FieldName::Rate | FieldName::Balance | FieldName::Deposit => None,
    }
}

fn parse_status(raw: &str) -> Result<PaymentStatus, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::Required(FieldName::Status));
    }
    raw.parse().map_err(|_| FieldError::UnknownStatus)
}

/// Parse a number field. Blank input is missing, not zero.
fn parse_number(name: FieldName, raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required(name));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| FieldError::NotANumber(name))?;
    if !value.is_finite() {
        return Err(FieldError::NotANumber(name));
    }
    if value < 0.0 && name != FieldName::Balance {
        return Err(FieldError::Negative(name));
    }
    Ok(value)
}

/// Validate every field. Produces a draft only when all fields pass.
pub fn validate(values: &FormValues) -> Result<CustomerDraft, FieldErrors> {
    let mut errors = FieldErrors::default();
    for name in FieldName::ALL {
        errors.set(name, validate_field(name, values.get(name)));
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    match (
        parse_status(&values.status),
        parse_number(FieldName::Rate, &values.rate),
        parse_number(FieldName::Balance, &values.balance),
        parse_number(FieldName::Deposit, &values.deposit),
    ) {
        (Ok(status), Ok(rate), Ok(balance), Ok(deposit)) => Ok(CustomerDraft {
            name: values.name.trim().to_owned(),
            description: values.description.clone(),
            status,
            rate,
            balance,
            deposit,
        }),
        _ => Err(errors),
    }
}
