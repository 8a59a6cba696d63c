pub mod browser;
pub mod columns;
pub mod detail;
pub mod help;
pub mod picker;

pub use browser::{render_browser, Viewport};
pub use columns::render_columns;
pub use detail::render_detail;
pub use help::render_help;
pub use picker::render_picker;
