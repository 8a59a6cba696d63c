pub mod table;
pub mod terminal;
pub mod utils;

pub use table::{body_row, build_table, header_row, highlight_row, rate_bar_spans};
pub use terminal::TerminalGuard;
