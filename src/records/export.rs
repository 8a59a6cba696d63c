use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;

use crate::error::{Context, Result};

use super::dataset::Dataset;
use super::fields::column_label;

pub const DEFAULT_EXPORT_FILENAME: &str = "eligibility_criteria_export.csv";

/// Serialize `rows` (dataset indices, already filtered and sorted) over `columns`.
///
/// Fields are quoted only when they need it (delimiter, quote, or line break).
/// Records are joined with `\n` and the document carries no trailing newline.
pub fn export_csv(dataset: &Dataset, rows: &[usize], columns: &[&str]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|key| column_label(key)))?;
    for rule in rows.iter().filter_map(|&idx| dataset.get(idx)) {
        writer.write_record(columns.iter().map(|key| rule.text(key)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .context("Failed to finish CSV export")?;
    let mut document =
        String::from_utf8(bytes).context("CSV export produced invalid UTF-8")?;
    if document.ends_with('\n') {
        document.pop();
    }
    Ok(document)
}

/// Write the export under `dir` with `filename`, returning the full path.
pub fn save_export(
    dataset: &Dataset,
    rows: &[usize],
    columns: &[&str],
    dir: &Path,
    filename: &str,
) -> Result<PathBuf> {
    let document = export_csv(dataset, rows, columns)?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(filename);
    fs::write(&path, document.as_bytes())
        .with_context(|| format!("Failed to write export file {}", path.display()))?;

    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(path)
}
