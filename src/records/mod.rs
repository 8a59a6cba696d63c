use std::path::PathBuf;

use crate::error::Result;

pub mod dataset;
pub mod export;
pub mod fields;
pub mod rule;

pub use dataset::{Dataset, DatasetSummary};
pub use export::{export_csv, save_export, DEFAULT_EXPORT_FILENAME};
pub use rule::Rule;

/// Facade that keeps dataset loading and export files isolated from the rest of the app.
pub struct Records {
    source: String,
    export_dir: PathBuf,
    export_filename: String,
}

impl Records {
    pub fn new<S, D, F>(source: S, export_dir: D, export_filename: F) -> Self
    where
        S: Into<String>,
        D: Into<PathBuf>,
        F: Into<String>,
    {
        Self {
            source: source.into(),
            export_dir: export_dir.into(),
            export_filename: export_filename.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub async fn load_dataset(&self) -> Result<Dataset> {
        Dataset::load(&self.source).await
    }

    /// Persist the given rows and columns to the configured export file.
    pub fn save_export(&self, dataset: &Dataset, rows: &[usize], columns: &[&str]) -> Result<PathBuf> {
        export::save_export(dataset, rows, columns, &self.export_dir, &self.export_filename)
    }
}
