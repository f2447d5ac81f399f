//! Rows as displayed: filtered, sorted, then paginated.

use pagination::Page;

use super::TableState;
use crate::domain::{Customer, CustomerId};

/// Header checkbox state for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    /// No row on the page is selected.
    None,
    /// Some rows on the page are selected.
    Partial,
    /// Every row on the page is selected.
    All,
}

/// Derived view of the customer table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    page: Page<Customer>,
    selected: Vec<Customer>,
}

impl TableView {
    /// Derive the view of `rows` under `table`.
    ///
    /// Sorting is stable, so rows that compare equal keep store order. A page
    /// index past the end is pulled back onto the last page.
    pub fn compute(rows: &[Customer], table: &TableState) -> Self {
        let mut filtered: Vec<Customer> = rows
            .iter()
            .filter(|row| table.matches(row))
            .cloned()
            .collect();
        filtered.sort_by(|left, right| table.compare(left, right));
        let selected = filtered
            .iter()
            .filter(|row| table.is_selected(&row.id))
            .cloned()
            .collect();
        let page = table.page().clamp_to(filtered.len()).apply(&filtered);
        Self { page, selected }
    }

    /// Rows on the current page.
    pub fn rows(&self) -> &[Customer] {
        self.page.items()
    }

    /// Page envelope with totals.
    pub fn page(&self) -> &Page<Customer> {
        &self.page
    }

    /// Rows left after filtering, across every page.
    pub fn filtered_count(&self) -> usize {
        self.page.total_items()
    }

    /// Selected rows that survive the current filters.
    pub fn selected_rows(&self) -> &[Customer] {
        &self.selected
    }

    /// Identifiers of the rows on the current page.
    pub fn page_ids(&self) -> Vec<CustomerId> {
        self.rows().iter().map(|row| row.id.clone()).collect()
    }

    /// Header checkbox state.
    pub fn page_selection(&self, table: &TableState) -> PageSelection {
        let selected = self
            .rows()
            .iter()
            .filter(|row| table.is_selected(&row.id))
            .count();
        match selected {
            0 => PageSelection::None,
            n if n == self.rows().len() => PageSelection::All,
            _ => PageSelection::Partial,
        }
    }
}
