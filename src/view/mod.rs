//! Pure filter → sort → paginate pipeline driven by an immutable `ViewState`.

pub mod columns;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod state;

pub use columns::{column_groups, ColumnGroup, ColumnToggle, ColumnVisibility};
pub use filter::{filter_rules, FilterCriteria};
pub use paginate::{page_buttons, render_buttons, total_pages, PageButton};
pub use sort::{sort_rows, SortDirection, SortState};
pub use state::{TableView, ViewState, DEFAULT_PAGE_SIZE};
