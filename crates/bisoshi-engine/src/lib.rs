// Engine module - pure list-view logic (filter, sort, paginate, select) and analytics.
// Nothing in here performs I/O; the runtime feeds it records and user input.

pub mod answer;
pub mod list_view;
pub mod paginate;
pub mod pipeline;
pub mod summary;
pub mod table;

pub use answer::{DEFAULT_REPLY, sanitize_answer};
pub use list_view::ListView;
pub use paginate::{empty_rows, page_count, page_slice};
pub use pipeline::{Comparator, apply_filter, matches_filter};
pub use summary::{BoardOverview, ProductOverview, SalesOverview};
pub use table::{DEFAULT_ROWS_PER_PAGE, TableState};
