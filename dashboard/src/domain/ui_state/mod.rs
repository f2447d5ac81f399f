//! Dashboard UI state and its reducer.
//!
//! [`UiState`] is a plain value owned by the session. Every change goes
//! through [`UiState::reduce`], which consumes the current state and an
//! action and returns the next state. Modal and table state are independent:
//! closing the modal never resets sorting, filters, or selection.

mod table;
mod toolbar;
mod view;

use tracing::debug;

use crate::domain::{Customer, CustomerId};

pub use table::{Column, Sort, SortDirection, TableState};
pub use toolbar::{PrimaryAction, Toolbar};
pub use view::{PageSelection, TableView};

/// Which dialog the customer modal shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    /// No modal.
    #[default]
    Closed,
    /// Creating a customer.
    Adding,
    /// Editing the target customer.
    Editing(Customer),
    /// Read-only view of the target customer.
    Viewing(Customer),
}

impl ModalState {
    /// Whether a modal is showing.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Customer the modal targets, if any.
    pub fn target(&self) -> Option<&Customer> {
        match self {
            Self::Editing(customer) | Self::Viewing(customer) => Some(customer),
            Self::Closed | Self::Adding => None,
        }
    }
}

/// Bulk-delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteDialog {
    /// Whether the dialog is showing.
    pub open: bool,
    /// Identifiers awaiting confirmation.
    pub ids: Vec<CustomerId>,
    /// Whether the confirmed delete is in flight.
    pub deleting: bool,
}

impl DeleteDialog {
    /// Dialog heading.
    pub const TITLE: &'static str = "Are you absolutely sure?";
    /// Dialog body.
    pub const DESCRIPTION: &'static str = "This action cannot be undone.";
}

/// Named state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Open the modal to create a customer.
    OpenAddModal,
    /// Open the modal to edit a customer.
    OpenEditModal(Customer),
    /// Open the modal read-only.
    OpenViewModal(Customer),
    /// Close the modal.
    CloseModal,
    /// Sort by a column, flipping direction when it is already ascending.
    ToggleSort(Column),
    /// Remove sorting.
    ClearSort,
    /// Set or clear (with blank text) one column's filter.
    SetColumnFilter {
        /// Filtered column.
        column: Column,
        /// Substring to match.
        value: String,
    },
    /// Set the free-text search.
    SetGlobalFilter(String),
    /// Show or hide a column.
    SetColumnVisibility {
        /// Target column.
        column: Column,
        /// Whether to show it.
        visible: bool,
    },
    /// Toggle one row's selection.
    ToggleRow(CustomerId),
    /// Select every listed row, or clear them all when all are selected.
    TogglePage(Vec<CustomerId>),
    /// Clear the selection.
    ClearSelection,
    /// Drop the listed identifiers from the selection.
    Deselect(Vec<CustomerId>),
    /// Jump to a page.
    SetPageIndex(usize),
    /// Change the page size, returning to the first page.
    SetPageSize(usize),
    /// Restore the default table state.
    ResetTable,
    /// Ask for confirmation before deleting.
    RequestDelete(Vec<CustomerId>),
    /// Confirmation given; the delete is in flight.
    BeginDelete,
    /// The delete settled.
    FinishDelete,
    /// Dismiss the confirmation dialog.
    CancelDelete,
}

/// Whole UI state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    /// Customer modal.
    pub modal: ModalState,
    /// Bulk-delete dialog.
    pub delete_dialog: DeleteDialog,
    /// Table state.
    pub table: TableState,
}

impl UiState {
    /// Initial state with the given page size.
    pub fn with_page_size(size: usize) -> Self {
        Self {
            table: TableState::with_page_size(size),
            ..Self::default()
        }
    }

    /// Apply `action` and return the next state.
    #[must_use]
    pub fn reduce(mut self, action: UiAction) -> Self {
        debug!(?action, "reducing ui action");
        match action {
            UiAction::OpenAddModal => self.modal = ModalState::Adding,
            UiAction::OpenEditModal(customer) => self.modal = ModalState::Editing(customer),
            UiAction::OpenViewModal(customer) => self.modal = ModalState::Viewing(customer),
            UiAction::CloseModal => self.modal = ModalState::Closed,
            UiAction::ToggleSort(column) => self.table.toggle_sort(column),
            UiAction::ClearSort => self.table.clear_sort(),
            UiAction::SetColumnFilter { column, value } => {
                self.table.set_column_filter(column, &value);
            }
            UiAction::SetGlobalFilter(value) => self.table.set_global_filter(&value),
            UiAction::SetColumnVisibility { column, visible } => {
                self.table.set_visibility(column, visible);
            }
            UiAction::ToggleRow(id) => self.table.toggle_row(id),
            UiAction::TogglePage(ids) => self.table.toggle_page(ids),
            UiAction::ClearSelection => self.table.clear_selection(),
            UiAction::Deselect(ids) => self.table.deselect(&ids),
            UiAction::SetPageIndex(index) => self.table.set_page_index(index),
            UiAction::SetPageSize(size) => self.table.set_page_size(size),
            UiAction::ResetTable => self.table.reset(),
            UiAction::RequestDelete(ids) => {
                if !ids.is_empty() && !self.delete_dialog.deleting {
                    self.delete_dialog = DeleteDialog {
                        open: true,
                        ids,
                        deleting: false,
                    };
                }
            }
            UiAction::BeginDelete => {
                if self.delete_dialog.open {
                    self.delete_dialog.deleting = true;
                }
            }
            UiAction::FinishDelete => self.delete_dialog = DeleteDialog::default(),
            UiAction::CancelDelete => {
                if !self.delete_dialog.deleting {
                    self.delete_dialog = DeleteDialog::default();
                }
            }
        }
        self
    }
}
