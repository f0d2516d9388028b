use crate::pipeline::Comparator;
use bisoshi_types::{RecordId, SortDirection};
use serde::Serialize;
use std::collections::BTreeSet;

pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

/// Sort, page and selection state of one list view.
///
/// Created with defaults when a view opens and dropped with it; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableState {
    order: SortDirection,
    order_by: Option<String>,
    page: usize,
    rows_per_page: usize,
    selected: BTreeSet<RecordId>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl TableState {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            order: SortDirection::Ascending,
            order_by: None,
            page: 0,
            rows_per_page: rows_per_page.max(1),
            selected: BTreeSet::new(),
        }
    }

    pub fn order(&self) -> SortDirection {
        self.order
    }

    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn selected(&self) -> &BTreeSet<RecordId> {
        &self.selected
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    pub fn comparator(&self) -> Option<Comparator<'_>> {
        self.order_by
            .as_deref()
            .map(|field| Comparator::new(field, self.order))
    }

    /// Same column flips the direction; a new column starts ascending.
    /// Either way the view goes back to the first page.
    pub fn set_sort(&mut self, field: &str) {
        if self.order_by.as_deref() == Some(field) {
            self.order = self.order.toggled();
        } else {
            self.order_by = Some(field.to_string());
            self.order = SortDirection::Ascending;
        }
        self.page = 0;
    }

    /// Explicit column and direction, as used by command-line flags.
    pub fn sort_by(&mut self, field: &str, order: SortDirection) {
        self.order_by = Some(field.to_string());
        self.order = order;
        self.page = 0;
    }

    /// Add the id if absent, remove it if present. Independent of paging.
    pub fn toggle_select(&mut self, id: &RecordId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    /// Select exactly `ids` when checked, nothing otherwise.
    pub fn select_all<I>(&mut self, checked: bool, ids: I)
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.selected.clear();
        if checked {
            self.selected.extend(ids);
        }
    }

    /// Drop selected ids that are no longer in the collection.
    pub fn retain_selection(&mut self, present: &BTreeSet<RecordId>) {
        self.selected.retain(|id| present.contains(id));
    }

    pub fn deselect(&mut self, id: &RecordId) {
        self.selected.remove(id);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changing the page size returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.page = 0;
    }

    pub fn reset_page(&mut self) {
        self.page = 0;
    }
}
