//! Declarative description of the customer form fields.

use std::fmt;

use serde::Serialize;

use crate::domain::PaymentStatus;

/// Customer form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Display name.
    Name,
    /// Free-text description.
    Description,
    /// Payment status.
    Status,
    /// Billing rate.
    Rate,
    /// Signed balance.
    Balance,
    /// Deposit held.
    Deposit,
}

impl FieldName {
    /// Every field, in display order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Description,
        Self::Status,
        Self::Rate,
        Self::Balance,
        Self::Deposit,
    ];

    /// Form key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Status => "status",
            Self::Rate => "rate",
            Self::Balance => "balance",
            Self::Deposit => "deposit",
        }
    }

    /// Human label, also used in validation messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::Rate => "Rate",
            Self::Balance => "Balance",
            Self::Deposit => "Deposit",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input widget a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// Closed list of options.
    Select {
        /// Allowed values, in menu order.
        options: &'static [&'static str],
    },
    /// Decimal number typed as text.
    Number,
}

/// Metadata for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field key.
    pub name: FieldName,
    /// Label shown above the input.
    pub label: &'static str,
    /// Widget kind.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether submission requires a value.
    pub required: bool,
    /// Placeholder text; selects use "Select <label>".
    pub placeholder: &'static str,
}

const FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor {
        name: FieldName::Name,
        label: "Name",
        kind: FieldKind::Text,
        required: true,
        placeholder: "Enter customer name",
    },
    FieldDescriptor {
        name: FieldName::Description,
        label: "Description",
        kind: FieldKind::TextArea,
        required: false,
        placeholder: "Enter customer description",
    },
    FieldDescriptor {
        name: FieldName::Status,
        label: "Status",
        kind: FieldKind::Select {
            options: &PaymentStatus::LABELS,
        },
        required: true,
        placeholder: "Select Status",
    },
    FieldDescriptor {
        name: FieldName::Rate,
        label: "Rate",
        kind: FieldKind::Number,
        required: true,
        placeholder: "Enter customer rate",
    },
    FieldDescriptor {
        name: FieldName::Balance,
        label: "Balance",
        kind: FieldKind::Number,
        required: true,
        placeholder: "Enter customer balance",
    },
    FieldDescriptor {
        name: FieldName::Deposit,
        label: "Deposit",
        kind: FieldKind::Number,
        required: true,
        placeholder: "Enter customer deposit",
    },
];

/// The customer form's fields, in display order.
pub fn customer_fields() -> &'static [FieldDescriptor] {
    &FIELDS
}

/// Descriptor for one field.
pub fn descriptor(name: FieldName) -> &'static FieldDescriptor {
    match name {
        FieldName::Name => &FIELDS[0],
        FieldName::Description => &FIELDS[1],
        FieldName::Status => &FIELDS[2],
        FieldName::Rate => &FIELDS[3],
        FieldName::Balance => &FIELDS[4],
        FieldName::Deposit => &FIELDS[5],
    }
}
