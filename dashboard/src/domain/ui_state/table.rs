//! Table state: sorting, filtering, column visibility, selection, paging.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use serde::Serialize;

use crate::domain::{Customer, CustomerId};

/// Customer table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    /// Row selection checkbox.
    Select,
    /// Identifier, headed `#`.
    Id,
    /// Display name.
    Name,
    /// Free-text description.
    Description,
    /// Payment status badge.
    Status,
    /// Billing rate.
    Rate,
    /// Signed balance.
    Balance,
    /// Deposit held.
    Deposit,
}

impl Column {
    /// Every column, in display order.
    pub const ALL: [Self; 8] = [
        Self::Select,
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Status,
        Self::Rate,
        Self::Balance,
        Self::Deposit,
    ];

    /// Header label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Select => "",
            Self::Id => "#",
            Self::Name => "NAME",
            Self::Description => "DESCRIPTION",
            Self::Status => "STATUS",
            Self::Rate => "RATE",
            Self::Balance => "BALANCE",
            Self::Deposit => "DEPOSIT",
        }
    }

    /// Whether the header toggles sorting.
    pub const fn is_sortable(self) -> bool {
        matches!(self, Self::Id | Self::Name | Self::Status)
    }

    /// Whether the column can be hidden.
    pub const fn is_hideable(self) -> bool {
        !matches!(self, Self::Select)
    }

    /// Text a filter on this column matches against, as the cell displays it.
    pub fn cell_text(self, customer: &Customer) -> String {
        match self {
            Self::Select => String::new(),
            Self::Id => customer.id.to_string(),
            Self::Name => customer.name.clone(),
            Self::Description => customer.description.clone(),
            Self::Status => customer.status.to_string(),
            Self::Rate => currency_text(customer.rate),
            Self::Balance => currency_text(customer.balance),
            Self::Deposit => currency_text(customer.deposit),
        }
    }

    fn compare(self, left: &Customer, right: &Customer) -> Ordering {
        match self {
            Self::Id => match (left.id.sequence(), right.id.sequence()) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => left.id.cmp(&right.id),
            },
            Self::Name => compare_text(&left.name, &right.name),
            Self::Description => compare_text(&left.description, &right.description),
            Self::Status => left.status.as_str().cmp(right.status.as_str()),
            Self::Rate => left.rate.total_cmp(&right.rate),
            Self::Balance => left.balance.total_cmp(&right.balance),
            Self::Deposit => left.deposit.total_cmp(&right.deposit),
            Self::Select => Ordering::Equal,
        }
    }
}

fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sort order of the sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sort {
    /// Sorted column.
    pub column: Column,
    /// Direction.
    pub direction: SortDirection,
}

/// Table state independent of the modal.
///
/// ## Invariants
/// - Only sortable columns are ever sorted.
/// - Filters are never stored blank.
/// - `Select` is never hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    sort: Option<Sort>,
    column_filters: BTreeMap<Column, String>,
    hidden: BTreeSet<Column>,
    selection: BTreeSet<CustomerId>,
    global_filter: String,
    page: PageRequest,
    default_page: PageRequest,
}

impl Default for TableState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    /// Default state with a custom page size; out-of-range sizes fall back
    /// to the default.
    pub fn with_page_size(size: usize) -> Self {
        let page = PageRequest::new(0, size).unwrap_or_default();
        Self {
            sort: None,
            column_filters: BTreeMap::new(),
            hidden: BTreeSet::new(),
            selection: BTreeSet::new(),
            global_filter: String::new(),
            page,
            default_page: page,
        }
    }

    /// Active sort, if any.
    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Filter text for `column`, if one is set.
    pub fn column_filter(&self, column: Column) -> Option<&str> {
        self.column_filters.get(&column).map(String::as_str)
    }

    /// Whether `column` is shown.
    pub fn is_visible(&self, column: Column) -> bool {
        !self.hidden.contains(&column)
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|column| self.is_visible(*column))
            .collect()
    }

    /// Selected identifiers.
    pub fn selection(&self) -> &BTreeSet<CustomerId> {
        &self.selection
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &CustomerId) -> bool {
        self.selection.contains(id)
    }

    /// Free-text search.
    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    /// Whether any column filter is set.
    pub fn is_filtered(&self) -> bool {
        !self.column_filters.is_empty()
    }

    /// Current page window.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub(super) fn reset(&mut self) {
        *self = Self::with_page_size(self.default_page.size());
    }

    pub(super) fn toggle_sort(&mut self, column: Column) {
        if !column.is_sortable() {
            return;
        }
        let currently_ascending = self.sort
            == Some(Sort {
                column,
                direction: SortDirection::Ascending,
            });
        let direction = if currently_ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort = Some(Sort { column, direction });
    }

    pub(super) fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub(super) fn set_column_filter(&mut self, column: Column, value: &str) {
        if value.trim().is_empty() {
            self.column_filters.remove(&column);
        } else {
            self.column_filters.insert(column, value.to_owned());
        }
        self.first_page();
    }

    pub(super) fn set_global_filter(&mut self, value: &str) {
        value.clone_into(&mut self.global_filter);
        self.first_page();
    }

    pub(super) fn set_visibility(&mut self, column: Column, visible: bool) {
        if visible {
            self.hidden.remove(&column);
        } else if column.is_hideable() {
            self.hidden.insert(column);
        }
    }

    pub(super) fn toggle_row(&mut self, id: CustomerId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    pub(super) fn toggle_page(&mut self, page_ids: Vec<CustomerId>) {
        let all_selected = !page_ids.is_empty() && page_ids.iter().all(|id| self.is_selected(id));
        if all_selected {
            for id in &page_ids {
                self.selection.remove(id);
            }
        } else {
            self.selection.extend(page_ids);
        }
    }

    pub(super) fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub(super) fn deselect(&mut self, ids: &[CustomerId]) {
        for id in ids {
            self.selection.remove(id);
        }
    }

    pub(super) fn set_page_index(&mut self, index: usize) {
        self.page = self.page.with_index(index);
    }

    pub(super) fn set_page_size(&mut self, size: usize) {
        if let Ok(page) = PageRequest::new(0, size) {
            self.page = page;
        }
    }

    fn first_page(&mut self) {
        self.page = self.page.with_index(0);
    }

    /// Whether `customer` passes every column filter and the global filter.
    pub fn matches(&self, customer: &Customer) -> bool {
        let columns_match = self
            .column_filters
            .iter()
            .all(|(column, value)| contains_ignore_case(&column.cell_text(customer), value));
        columns_match && self.matches_global(customer)
    }

    fn matches_global(&self, customer: &Customer) -> bool {
        let needle = self.global_filter.trim();
        if needle.is_empty() {
            return true;
        }
        [Column::Id, Column::Name, Column::Description, Column::Status]
            .into_iter()
            .any(|column| contains_ignore_case(&column.cell_text(customer), needle))
    }

    /// Order two rows under the active sort; equal rows keep their order.
    pub fn compare(&self, left: &Customer, right: &Customer) -> Ordering {
        match self.sort {
            None => Ordering::Equal,
            Some(Sort { column, direction }) => {
                let ordering = column.compare(left, right);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    }
}

/// Canadian dollars in en-US notation, e.g. `-CA$1,234.50`.
fn currency_text(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}CA${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    //! Sorting, filter matching, and selection rules.
    use super::*;
    use crate::domain::{Amounts, CustomerDraft, PaymentStatus};
    use rstest::{fixture, rstest};

    #[fixture]
    fn ann() -> Customer {
        CustomerDraft::new(
            "Ann Culhane",
            "Lorem ipsum dolor",
            PaymentStatus::Open,
            Amounts {
                rate: 70.0,
                balance: -270.0,
                deposit: 500.0,
            },
        )
        .with_id(CustomerId::from_sequence(1))
    }

    #[rstest]
    fn toggle_sort_alternates_direction() {
        let mut table = TableState::default();
        table.toggle_sort(Column::Name);
        assert_eq!(
            table.sort().map(|sort| sort.direction),
            Some(SortDirection::Ascending)
        );
        table.toggle_sort(Column::Name);
        assert_eq!(
            table.sort().map(|sort| sort.direction),
            Some(SortDirection::Descending)
        );
        table.toggle_sort(Column::Name);
        assert_eq!(
            table.sort().map(|sort| sort.direction),
            Some(SortDirection::Ascending)
        );
    }

    #[rstest]
    fn switching_columns_starts_ascending() {
        let mut table = TableState::default();
        table.toggle_sort(Column::Name);
        table.toggle_sort(Column::Name);
        table.toggle_sort(Column::Status);
        assert_eq!(
            table.sort(),
            Some(Sort {
                column: Column::Status,
                direction: SortDirection::Ascending,
            })
        );
    }

    #[rstest]
    #[case(Column::Select)]
    #[case(Column::Description)]
    #[case(Column::Balance)]
    fn unsortable_columns_are_ignored(#[case] column: Column) {
        let mut table = TableState::default();
        table.toggle_sort(column);
        assert_eq!(table.sort(), None);
    }

    #[rstest]
    #[case(Column::Name, "culhane", true)]
    #[case(Column::Name, "CULH", true)]
    #[case(Column::Name, "rosser", false)]
    #[case(Column::Status, "open", true)]
    #[case(Column::Balance, "-CA$270.00", true)]
    #[case(Column::Deposit, "ca$500", true)]
    #[case(Column::Rate, "70.00", true)]
    #[case(Column::Rate, "-CA$", false)]
    fn column_filter_matches_case_insensitively(
        ann: Customer,
        #[case] column: Column,
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        let mut table = TableState::default();
        table.set_column_filter(column, value);
        assert_eq!(table.matches(&ann), expected);
    }

    #[rstest]
    #[case("ipsum", true)]
    #[case("1", true)]
    #[case("open", true)]
    #[case("500", false)]
    fn global_filter_searches_text_columns(
        ann: Customer,
        #[case] needle: &str,
        #[case] expected: bool,
    ) {
        let mut table = TableState::default();
        table.set_global_filter(needle);
        assert_eq!(table.matches(&ann), expected);
    }

    #[rstest]
    #[case(0.0, "CA$0.00")]
    #[case(-0.001, "CA$0.00")]
    #[case(70.0, "CA$70.00")]
    #[case(-270.5, "-CA$270.50")]
    #[case(1_234.567, "CA$1,234.57")]
    #[case(1_000_000.0, "CA$1,000,000.00")]
    fn amounts_render_as_currency(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(currency_text(amount), expected);
    }

    #[rstest]
    fn blank_filters_are_removed() {
        let mut table = TableState::default();
        table.set_column_filter(Column::Status, "Paid");
        assert!(table.is_filtered());
        table.set_column_filter(Column::Status, "  ");
        assert!(!table.is_filtered());
    }

    #[rstest]
    fn filter_changes_reset_page_index() {
        let mut table = TableState::default();
        table.set_page_index(3);
        table.set_global_filter("ann");
        assert_eq!(table.page().index(), 0);

        table.set_page_index(2);
        table.set_column_filter(Column::Name, "ann");
        assert_eq!(table.page().index(), 0);
    }

    #[rstest]
    fn page_size_change_resets_index_and_rejects_zero() {
        let mut table = TableState::default();
        table.set_page_index(4);
        table.set_page_size(25);
        assert_eq!(table.page().index(), 0);
        assert_eq!(table.page().size(), 25);

        table.set_page_size(0);
        assert_eq!(table.page().size(), 25);
    }

    #[rstest]
    fn select_column_cannot_be_hidden() {
        let mut table = TableState::default();
        table.set_visibility(Column::Select, false);
        table.set_visibility(Column::Description, false);
        assert!(table.is_visible(Column::Select));
        assert!(!table.visible_columns().contains(&Column::Description));

        table.set_visibility(Column::Description, true);
        assert_eq!(table.visible_columns(), Column::ALL.to_vec());
    }

    #[rstest]
    fn toggle_page_selects_then_clears() {
        let ids = vec![CustomerId::from_sequence(1), CustomerId::from_sequence(2)];
        let mut table = TableState::default();
        table.toggle_row(CustomerId::from_sequence(1));

        table.toggle_page(ids.clone());
        assert_eq!(table.selection().len(), 2);

        table.toggle_page(ids);
        assert!(table.selection().is_empty());
    }

    #[rstest]
    fn numeric_ids_sort_numerically(ann: Customer) {
        let tenth = Customer {
            id: CustomerId::from_sequence(10),
            ..ann.clone()
        };
        let mut table = TableState::default();
        table.toggle_sort(Column::Id);
        assert_eq!(table.compare(&ann, &tenth), Ordering::Less);

        table.toggle_sort(Column::Id);
        assert_eq!(table.compare(&ann, &tenth), Ordering::Greater);
    }
}
