use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::state::SessionState;
use crate::cli::{Commands, ExportArgs};
use crate::config::ViewerConfig;
use crate::error::{AppError, Result};
use crate::present::{cancer_option_label, summary_line};
use crate::records::fields::{CANCER_TYPE, RULE_SECTION};
use crate::records::{Dataset, Records};
use crate::ui::run_browser;
use crate::utils::load_stamp;
use crate::view::{ColumnVisibility, TableView, ViewState};

/// Coordinates configuration, dataset loading, and the selected command.
pub struct AppController {
    config: ViewerConfig,
    records: Records,
}

impl AppController {
    pub fn new(config: ViewerConfig) -> Self {
        let records = Records::new(
            config.data_source.clone(),
            config.export_dir.clone(),
            config.export_filename.clone(),
        );
        Self { config, records }
    }

    pub async fn run(self, command: Commands) -> Result<()> {
        let dataset = self.records.load_dataset().await?;

        match command {
            Commands::Browse => self.browse(dataset),
            Commands::Export(args) => {
                let (path, rows) = self.export(&dataset, &args)?;
                println!("Exported {rows} rows to {}", path.display());
                Ok(())
            }
            Commands::Stats => {
                print!("{}", stats_report(&dataset));
                Ok(())
            }
        }
    }

    fn browse(self, dataset: Dataset) -> Result<()> {
        let mut session = SessionState::new(self.config, self.records, dataset);
        session.set_status(format!(
            "Loaded {} rules at {}",
            session.dataset().len(),
            load_stamp(chrono::Local::now())
        ));
        run_browser(&mut session)
    }

    /// Run the table pipeline headlessly and write every matching row.
    pub fn export(&self, dataset: &Dataset, args: &ExportArgs) -> Result<(PathBuf, usize)> {
        if let Some(column) = &args.sort {
            ensure_columns(dataset, std::slice::from_ref(column))?;
        }
        let visibility = match &args.columns {
            Some(columns) => {
                ensure_columns(dataset, columns)?;
                ColumnVisibility::from_keys(columns.iter().cloned())
            }
            None => self.config.column_visibility(),
        };

        let state = ViewState {
            filters: args.criteria(),
            sort: args.sort_state(),
            ..ViewState::new(self.config.default_page_size, visibility)
        };
        let view = TableView::build(dataset, &state);
        let columns = state.columns.ordered(dataset.columns());

        let path = match &args.output {
            Some(output) => {
                let (dir, name) = split_output(output)?;
                Records::new(self.records.source(), dir, name).save_export(
                    dataset,
                    &view.rows,
                    &columns,
                )?
            }
            None => self.records.save_export(dataset, &view.rows, &columns)?,
        };
        info!("Headless export wrote {} rows", view.total());
        Ok((path, view.total()))
    }
}

fn ensure_columns(dataset: &Dataset, columns: &[String]) -> Result<()> {
    let unknown: Vec<&str> = columns
        .iter()
        .filter(|key| !dataset.has_column(key))
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "unknown column key(s): {}",
            unknown.join(", ")
        )))
    }
}

fn split_output(output: &Path) -> Result<(PathBuf, String)> {
    let name = output
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            AppError::message(format!("`{}` is not a file path", output.display()))
        })?;
    let dir = output
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((dir, name.to_string()))
}

/// Totals plus per-cancer-type and per-section rule counts.
pub fn stats_report(dataset: &Dataset) -> String {
    let mut by_cancer: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_section: BTreeMap<String, usize> = BTreeMap::new();
    for rule in dataset.rules() {
        *by_cancer.entry(rule.text(CANCER_TYPE)).or_default() += 1;
        *by_section.entry(rule.text(RULE_SECTION)).or_default() += 1;
    }

    let mut report = format!("{}\n", summary_line(&dataset.summary()));
    report.push_str("\nRules by cancer type:\n");
    for (cancer, count) in by_cancer.iter().filter(|(key, _)| !key.is_empty()) {
        report.push_str(&format!("  {:<32} {count}\n", cancer_option_label(cancer)));
    }
    report.push_str("\nRules by type:\n");
    for (section, count) in by_section.iter().filter(|(key, _)| !key.is_empty()) {
        report.push_str(&format!("  {section:<32} {count}\n"));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_json_str(
            r#"[
                {"ct":"Breast_Cancer","tid":"NCT1","r":"age, 18+","rs":"inclusion","of":0.5},
                {"ct":"Lung","tid":"NCT2","r":"no \"prior\" therapy","rs":"exclusion","of":0.1},
                {"ct":"Breast_Cancer","tid":"NCT3","r":"ECOG 0-1","rs":"inclusion","of":0.9}
            ]"#,
        )
        .expect("fixture parses")
    }

    fn controller(dir: &Path) -> AppController {
        AppController::new(ViewerConfig {
            export_dir: dir.to_path_buf(),
            ..ViewerConfig::builtin()
        })
    }

    #[test]
    fn headless_export_applies_filters_sort_and_columns() {
        let dir = std::env::temp_dir().join(format!("criteria_viewer_cli_{}", std::process::id()));
        let args = ExportArgs {
            cancer: Some("Breast_Cancer".to_string()),
            sort: Some("of".to_string()),
            desc: true,
            columns: Some(vec!["r".to_string(), "of".to_string()]),
            ..ExportArgs::default()
        };

        let (path, rows) = controller(&dir)
            .export(&dataset(), &args)
            .expect("export succeeds");
        assert_eq!(rows, 2);
        let text = std::fs::read_to_string(&path).expect("export readable");
        assert_eq!(text, "Rule Text,Frequency\nECOG 0-1,0.9\n\"age, 18+\",0.5");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let dir = std::env::temp_dir();
        let args = ExportArgs {
            columns: Some(vec!["nope".to_string()]),
            ..ExportArgs::default()
        };
        let err = controller(&dir)
            .export(&dataset(), &args)
            .expect_err("unknown column");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn output_path_splits_into_dir_and_name() {
        let (dir, name) = split_output(Path::new("out.csv")).expect("plain name");
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "out.csv");
        let (dir, name) = split_output(Path::new("exports/rules.csv")).expect("nested");
        assert_eq!(dir, PathBuf::from("exports"));
        assert_eq!(name, "rules.csv");
    }

    #[test]
    fn stats_report_counts_rules() {
        let report = stats_report(&dataset());
        assert!(report.starts_with("3 rules • 2 cancer types • 3 trials"));
        assert!(report.contains("Breast Cancer"));
        assert!(report.contains("inclusion"));
    }
}
