pub mod browser;

pub use browser::run_browser;
