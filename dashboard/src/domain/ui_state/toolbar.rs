//! Toolbar derived from the selection.

use super::{TableView, UiAction, UiState};
use crate::domain::{Customer, CustomerId};

/// What the primary toolbar button does.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryAction {
    /// Open the add modal.
    Add,
    /// Open the edit modal for the single selected row.
    Update(Customer),
}

impl PrimaryAction {
    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Add => "Add customer",
            Self::Update(_) => "Update customer",
        }
    }
}

/// Toolbar state for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Toolbar {
    primary: PrimaryAction,
    primary_enabled: bool,
    bulk_delete: Option<Vec<CustomerId>>,
    status_filter: Option<String>,
}

impl Toolbar {
    /// Derive the toolbar from the selected rows that survive the filters.
    ///
    /// One selected row turns the primary button into "Update customer" for
    /// that row. Two or more show the bulk-delete affordance instead of the
    /// filter and search controls and disable the primary button.
    pub fn derive(ui: &UiState, view: &TableView) -> Self {
        let selected = view.selected_rows();
        let (primary, bulk_delete) = match selected {
            [only] => (PrimaryAction::Update(only.clone()), None),
            [] => (PrimaryAction::Add, None),
            many => (
                PrimaryAction::Add,
                Some(many.iter().map(|row| row.id.clone()).collect()),
            ),
        };
        Self {
            primary_enabled: bulk_delete.is_none(),
            primary,
            bulk_delete,
            status_filter: ui
                .table
                .column_filter(super::Column::Status)
                .map(str::to_owned),
        }
    }

    /// Primary button behaviour.
    pub fn primary(&self) -> &PrimaryAction {
        &self.primary
    }

    /// Primary button label.
    pub fn primary_label(&self) -> &'static str {
        self.primary.label()
    }

    /// Whether the primary button accepts clicks.
    pub fn is_primary_enabled(&self) -> bool {
        self.primary_enabled
    }

    /// Action a primary click dispatches; `None` while disabled.
    pub fn primary_action(&self) -> Option<UiAction> {
        if !self.primary_enabled {
            return None;
        }
        Some(match &self.primary {
            PrimaryAction::Add => UiAction::OpenAddModal,
            PrimaryAction::Update(customer) => UiAction::OpenEditModal(customer.clone()),
        })
    }

    /// Identifiers the bulk-delete button targets, when it shows.
    pub fn bulk_delete(&self) -> Option<&[CustomerId]> {
        self.bulk_delete.as_deref()
    }

    /// "N selected" caption beside the bulk-delete button.
    pub fn selection_caption(&self) -> Option<String> {
        self.bulk_delete
            .as_ref()
            .map(|ids| format!("{} selected", ids.len()))
    }

    /// Whether the status filter menu and search box show.
    pub fn shows_filters(&self) -> bool {
        self.bulk_delete.is_none()
    }

    /// Status filter currently checked in the menu; `None` means all.
    pub fn status_filter(&self) -> Option<&str> {
        self.status_filter.as_deref()
    }
}
