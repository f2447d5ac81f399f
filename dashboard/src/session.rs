//! Dashboard session: the composition of service, UI state, and form.
//!
//! A session holds everything one open dashboard needs. Rows come from the
//! cache observer, so optimistic changes show up in the next
//! [`DashboardSession::table_view`] without an explicit refresh.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::form::{FormError, FormState, Submission};
use crate::domain::ports::{CustomerStore, Notifier};
use crate::domain::query_cache::QueryObserver;
use crate::domain::ui_state::{Toolbar, TableView, UiAction, UiState};
use crate::domain::{Customer, CustomerService, Error, MutationOutcome};

/// Failure to turn the open form into a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No modal is open.
    #[error("no customer form is open")]
    NoOpenForm,
    /// The form rejected the submission.
    #[error(transparent)]
    Form(#[from] FormError),
}

/// One user's dashboard.
pub struct DashboardSession<S, N> {
    service: CustomerService<S, N>,
    ui: UiState,
    form: Option<FormState>,
    rows: QueryObserver<Vec<Customer>>,
}

impl<S, N> DashboardSession<S, N>
where
    S: CustomerStore + 'static,
    N: Notifier,
{
    /// Session over `service` starting from `ui`.
    pub fn new(service: CustomerService<S, N>, ui: UiState) -> Self {
        let rows = service.observe();
        let form = FormState::for_modal(&ui.modal);
        Self {
            service,
            ui,
            form,
            rows,
        }
    }

    /// Load the customer list through the cache.
    pub async fn refresh(&mut self) -> Result<usize, Error> {
        let customers = self.service.customers().await?;
        debug!(count = customers.len(), "customer list loaded");
        Ok(customers.len())
    }

    /// Underlying service.
    pub fn service(&self) -> &CustomerService<S, N> {
        &self.service
    }

    /// Current UI state.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Apply a UI action. Opening or closing the modal replaces the form.
    pub fn dispatch(&mut self, action: UiAction) {
        let before = self.ui.modal.clone();
        self.ui = std::mem::take(&mut self.ui).reduce(action);
        if self.ui.modal != before {
            self.form = FormState::for_modal(&self.ui.modal);
        }
    }

    /// Cached customers in store order, empty before the first load.
    pub fn rows(&self) -> Vec<Customer> {
        self.rows.peek().unwrap_or_default()
    }

    /// Filtered, sorted, and paginated view of the rows.
    pub fn table_view(&self) -> TableView {
        TableView::compute(&self.rows(), &self.ui.table)
    }

    /// Toolbar for the current view.
    pub fn toolbar(&self) -> Toolbar {
        Toolbar::derive(&self.ui, &self.table_view())
    }

    /// Open form, if the modal is showing.
    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    /// Mutable access to the open form.
    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        self.form.as_mut()
    }

    /// Validate the open form and persist it.
    ///
    /// Invalid forms never reach the store. The modal closes once the store
    /// accepts the mutation and stays open after a rollback so the user can
    /// retry.
    pub async fn submit_form(&mut self) -> Result<MutationOutcome<Customer>, SessionError> {
        let form = self.form.as_mut().ok_or(SessionError::NoOpenForm)?;
        let outcome = match form.submit()? {
            Submission::Create(draft) => self.service.create(draft).await,
            Submission::Update(customer) => self.service.update(customer).await,
        };
        if outcome.is_committed() {
            self.dispatch(UiAction::CloseModal);
        }
        Ok(outcome)
    }

    /// Open the bulk-delete dialog for the toolbar's selection.
    ///
    /// Returns `false` when fewer than two selected rows are visible.
    pub fn request_delete_selected(&mut self) -> bool {
        let Some(ids) = self.toolbar().bulk_delete().map(<[_]>::to_vec) else {
            return false;
        };
        self.dispatch(UiAction::RequestDelete(ids));
        self.ui.delete_dialog.open
    }

    /// Delete the customers awaiting confirmation and close the dialog.
    ///
    /// Returns `None` when no dialog is open or a delete is already running.
    /// Committed identifiers leave the selection; a rollback keeps it.
    pub async fn confirm_delete(&mut self) -> Option<MutationOutcome<usize>> {
        if !self.ui.delete_dialog.open || self.ui.delete_dialog.deleting {
            return None;
        }
        self.dispatch(UiAction::BeginDelete);
        let ids = self.ui.delete_dialog.ids.clone();
        let outcome = self.service.delete(&ids).await;
        if outcome.is_committed() {
            info!(count = ids.len(), "confirmed delete committed");
            self.dispatch(UiAction::Deselect(ids));
        }
        self.dispatch(UiAction::FinishDelete);
        Some(outcome)
    }
}
