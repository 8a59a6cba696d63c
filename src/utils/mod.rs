pub mod debounce;
pub mod text;
pub mod time;

pub use debounce::{Debouncer, TimerHandle};
pub use text::{sanitize_display_text, truncate_chars};
pub use time::load_stamp;
