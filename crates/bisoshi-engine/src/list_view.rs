use crate::paginate::{empty_rows, page_count, page_slice};
use crate::pipeline::apply_filter;
use crate::table::TableState;
use bisoshi_types::{RecordId, Row, SortDirection};
use std::collections::BTreeSet;

/// Records of one view plus the table state and filter that shape them.
///
/// Every derived sequence (filtered, visible page, filler count) is
/// recomputed from scratch; there is no cached intermediate state to drift.
#[derive(Debug, Clone)]
pub struct ListView<R> {
    records: Vec<R>,
    table: TableState,
    filter: String,
}

impl<R: Row> Default for ListView<R> {
    fn default() -> Self {
        Self::new(TableState::default())
    }
}

impl<R: Row> ListView<R> {
    pub fn new(table: TableState) -> Self {
        Self {
            records: Vec::new(),
            table,
            filter: String::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn find(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| &r.row_id() == id)
    }

    /// Filtered and sorted rows.
    pub fn filtered(&self) -> Vec<&R> {
        apply_filter(&self.records, self.table.comparator(), &self.filter)
    }

    /// Rows on the current page.
    pub fn visible(&self) -> Vec<&R> {
        let filtered = self.filtered();
        page_slice(&filtered, self.table.page(), self.table.rows_per_page()).to_vec()
    }

    pub fn empty_rows(&self) -> usize {
        empty_rows(
            self.table.page(),
            self.table.rows_per_page(),
            self.filtered().len(),
        )
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered().len(), self.table.rows_per_page())
    }

    /// A non-empty filter that matched nothing.
    pub fn not_found(&self) -> bool {
        !self.filter.is_empty() && self.filtered().is_empty()
    }

    pub fn selected_rows(&self) -> Vec<&R> {
        self.records
            .iter()
            .filter(|r| self.table.is_selected(&r.row_id()))
            .collect()
    }

    // -- user input -------------------------------------------------------

    /// New filter text; the page goes back to 0 so a shorter result never
    /// leaves the view on a blank page.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.table.reset_page();
    }

    pub fn set_sort(&mut self, field: &str) {
        self.table.set_sort(field);
    }

    pub fn sort_by(&mut self, field: &str, order: SortDirection) {
        self.table.sort_by(field, order);
    }

    pub fn set_page(&mut self, page: usize) {
        self.table.set_page(page);
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.table.set_rows_per_page(rows_per_page);
    }

    pub fn toggle_select(&mut self, id: &RecordId) {
        self.table.toggle_select(id);
    }

    /// Select every row matching the current filter, or clear the selection.
    pub fn select_all(&mut self, checked: bool) {
        let ids: Vec<RecordId> = self.filtered().iter().map(|r| r.row_id()).collect();
        self.table.select_all(checked, ids);
    }

    // -- committed backend results ----------------------------------------

    /// Replace the whole collection.
    ///
    /// Selected ids that vanished are dropped and the page is pulled back to
    /// the last page that still exists.
    pub fn replace(&mut self, records: Vec<R>) {
        self.records = records;
        let present: BTreeSet<RecordId> = self.records.iter().map(|r| r.row_id()).collect();
        self.table.retain_selection(&present);
        self.clamp_page();
    }

    pub fn append(&mut self, record: R) {
        self.records.push(record);
    }

    /// Swap the row with `id` for `record`. Returns false if no row matched.
    pub fn replace_by_id(&mut self, id: &RecordId, record: R) -> bool {
        match self.records.iter_mut().find(|r| &r.row_id() == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Remove the row with `id`. Returns false if no row matched.
    ///
    /// Emptying the final page moves the view back one page.
    pub fn remove(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| &r.row_id() != id);
        self.table.deselect(id);
        self.clamp_page();
        self.records.len() != before
    }

    fn clamp_page(&mut self) {
        let last_page = self.page_count() - 1;
        if self.table.page() > last_page {
            self.table.set_page(last_page);
        }
    }
}
