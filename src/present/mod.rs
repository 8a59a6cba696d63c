//! Turn pipeline output into display-ready structures. Nothing here touches the terminal.

pub mod cell;
pub mod detail;
pub mod format;
pub mod table;

pub use cell::{render_cell, BadgeTone, CellView};
pub use detail::{rule_detail, DetailField, DrugFlag, RateBarItem, RuleDetail};
pub use format::RateTier;
pub use table::{
    cancer_option_label, pagination_info, present_page, summary_line, HeaderCell, PageModel,
    RowModel,
};
