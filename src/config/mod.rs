use std::path::PathBuf;
use std::time::Duration;

use crate::records::fields::DEFAULT_VISIBLE_COLUMNS;
use crate::records::DEFAULT_EXPORT_FILENAME;
use crate::view::{ColumnVisibility, DEFAULT_PAGE_SIZE};

pub mod loader;
pub mod validator;

pub use loader::{load_config_file, RawViewerConfig};

pub const DEFAULT_DATA_SOURCE: &str = "data/rules.json";
pub const DEFAULT_PAGE_SIZES: &[usize] = &[25, 50, 100];
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Runtime settings for the viewer. Built from defaults, an optional file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub data_source: String,
    pub page_sizes: Vec<usize>,
    pub default_page_size: usize,
    pub search_debounce_ms: u64,
    pub export_dir: PathBuf,
    pub export_filename: String,
    pub visible_columns: Vec<String>,
}

impl ViewerConfig {
    pub fn builtin() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            export_dir: PathBuf::from("."),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            visible_columns: DEFAULT_VISIBLE_COLUMNS
                .iter()
                .map(|key| (*key).to_string())
                .collect(),
        }
    }

    /// Overlay every field the file sets on top of `self`.
    pub fn merged(mut self, raw: RawViewerConfig) -> Self {
        if let Some(source) = raw.data_source {
            self.data_source = source;
        }
        if let Some(sizes) = raw.page_sizes {
            self.page_sizes = sizes;
        }
        if let Some(size) = raw.default_page_size {
            self.default_page_size = size;
        }
        if let Some(ms) = raw.search_debounce_ms {
            self.search_debounce_ms = ms;
        }
        if let Some(dir) = raw.export_dir {
            self.export_dir = dir;
        }
        if let Some(name) = raw.export_filename {
            self.export_filename = name;
        }
        if let Some(columns) = raw.visible_columns {
            self.visible_columns = columns;
        }
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn column_visibility(&self) -> ColumnVisibility {
        ColumnVisibility::from_keys(self.visible_columns.iter().cloned())
    }

    /// The selectable page size after `current`, wrapping around.
    pub fn next_page_size(&self, current: usize) -> usize {
        match self.page_sizes.iter().position(|size| *size == current) {
            Some(idx) => self.page_sizes[(idx + 1) % self.page_sizes.len()],
            None => self.page_sizes.first().copied().unwrap_or(current),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
