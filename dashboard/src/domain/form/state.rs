//! State of the open customer form.

use std::collections::BTreeSet;

use thiserror::Error;

use super::schema::FieldName;
use super::validation::{FieldError, FieldErrors, FormValues, validate, validate_field};
use crate::domain::ui_state::ModalState;
use crate::domain::{Customer, CustomerDraft};

/// Purpose of the open form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    /// Creating a customer.
    Add,
    /// Editing the given customer.
    Edit(Customer),
    /// Read-only view of the given customer.
    View(Customer),
}

impl FormMode {
    /// Dialog heading.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Add => "Add Customer",
            Self::Edit(_) => "Edit Customer",
            Self::View(_) => "View Customer",
        }
    }

    /// Footer buttons, left to right.
    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            Self::Add => &["Cancel", "Add"],
            Self::Edit(_) => &["Cancel", "Update"],
            Self::View(_) => &["Close"],
        }
    }

    /// Whether inputs accept edits.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::View(_))
    }
}

/// Rejected form interaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The form is read-only.
    #[error("the form is read-only")]
    ReadOnly,
    /// One or more fields failed validation.
    #[error("form has invalid fields: {0}")]
    Invalid(FieldErrors),
}

/// What a successful submission asks the service to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Create a customer from the draft.
    Create(CustomerDraft),
    /// Replace the customer with this revision.
    Update(Customer),
}

/// Values, touched fields, and errors of the customer form.
///
/// ## Invariants
/// - `errors` only holds entries for touched fields.
/// - A view-mode form never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    mode: FormMode,
    values: FormValues,
    touched: BTreeSet<FieldName>,
    errors: FieldErrors,
}

impl FormState {
    /// Form for `mode`, prefilled from the target customer when there is one.
    pub fn new(mode: FormMode) -> Self {
        let values = match &mode {
            FormMode::Add => FormValues::default(),
            FormMode::Edit(customer) | FormMode::View(customer) => {
                FormValues::from_draft(&customer.to_draft())
            }
        };
        Self {
            mode,
            values,
            touched: BTreeSet::new(),
            errors: FieldErrors::default(),
        }
    }

    /// Form matching the modal, or `None` when it is closed.
    pub fn for_modal(modal: &ModalState) -> Option<Self> {
        let mode = match modal {
            ModalState::Closed => return None,
            ModalState::Adding => FormMode::Add,
            ModalState::Editing(customer) => FormMode::Edit(customer.clone()),
            ModalState::Viewing(customer) => FormMode::View(customer.clone()),
        };
        Some(Self::new(mode))
    }

    /// Purpose of the form.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Current raw values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Whether `name` accepts input.
    pub fn is_disabled(&self, _name: FieldName) -> bool {
        !self.mode.is_editable()
    }

    /// Error to show beside `name`; only touched fields show errors.
    pub fn visible_error(&self, name: FieldName) -> Option<FieldError> {
        if self.touched.contains(&name) {
            self.errors.get(name)
        } else {
            None
        }
    }

    /// Whether any field currently shows an error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Record new text for `name`, re-validating it when already touched.
    pub fn change(&mut self, name: FieldName, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.values.set(name, value);
        if self.touched.contains(&name) {
            self.revalidate(name);
        }
        Ok(())
    }

    /// Mark `name` touched and validate it.
    pub fn blur(&mut self, name: FieldName) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.touched.insert(name);
        self.revalidate(name);
        Ok(())
    }

    /// Touch and validate every field, yielding what to persist.
    pub fn submit(&mut self) -> Result<Submission, FormError> {
        self.ensure_editable()?;
        self.touched.extend(FieldName::ALL);
        match validate(&self.values) {
            Ok(draft) => {
                self.errors = FieldErrors::default();
                Ok(match &self.mode {
                    FormMode::Edit(customer) => Submission::Update(customer.revised(draft)),
                    FormMode::Add | FormMode::View(_) => Submission::Create(draft),
                })
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(FormError::Invalid(errors))
            }
        }
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        if self.mode.is_editable() {
            Ok(())
        } else {
            Err(FormError::ReadOnly)
        }
    }

    fn revalidate(&mut self, name: FieldName) {
        let error = validate_field(name, self.values.get(name));
        self.errors.set(name, error);
    }
}
