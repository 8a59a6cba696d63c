use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::view::{FilterCriteria, SortDirection, SortState};

#[derive(Parser, Debug)]
#[command(name = "criteria-viewer")]
#[command(about = "Browse, filter, and export clinical-trial eligibility criteria")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Dataset location: a local JSON file or an http(s) URL
    #[arg(short, long)]
    pub data: Option<String>,

    /// JSON file overriding the builtin viewer settings [default: criteria-viewer.json if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive table (default)
    Browse,

    /// Write the filtered, sorted view to CSV without opening the table
    Export(ExportArgs),

    /// Print dataset totals
    Stats,
}

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Output file; defaults to the configured export directory and filename
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Case-insensitive substring of the rule text
    #[arg(long)]
    pub search: Option<String>,

    /// Exact cancer type key, e.g. Breast_Cancer
    #[arg(long)]
    pub cancer: Option<String>,

    /// inclusion or exclusion
    #[arg(long)]
    pub section: Option<String>,

    /// Exact trial id
    #[arg(long)]
    pub trial: Option<String>,

    /// Drug category key, e.g. dCh
    #[arg(long)]
    pub drug: Option<String>,

    /// Keep only cluster representatives
    #[arg(long)]
    pub unique: bool,

    /// Column key to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Comma separated column keys; defaults to the configured visible columns
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,
}

impl ExportArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            cancer_type: self.cancer.clone(),
            rule_section: self.section.clone(),
            trial_id: self.trial.clone(),
            drug: self.drug.clone(),
            unique_only: self.unique,
        }
    }

    pub fn sort_state(&self) -> SortState {
        match &self.sort {
            Some(column) => {
                let direction = if self.desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                SortState::by(column.clone(), direction)
            }
            None => SortState::default(),
        }
    }
}
