use std::collections::BTreeSet;
use std::path::Path;

use log::info;
use serde_json::Value;

use crate::error::{AppError, Result};

use super::fields::{CANCER_TYPE, TRIAL_ID};
use super::rule::Rule;

/// Aggregate figures shown in the viewer header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub rules: usize,
    pub cancer_types: usize,
    pub trials: usize,
}

/// Immutable in-memory copy of the rules file plus the column schema it implies.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rules: Vec<Rule>,
    columns: Vec<String>,
}

impl Dataset {
    /// Build a dataset, deriving the schema from the first record's keys.
    pub fn new(rules: Vec<Rule>) -> Self {
        let columns = rules
            .first()
            .map(|rule| rule.keys().map(str::to_string).collect())
            .unwrap_or_default();
        Self { rules, columns }
    }

    /// Load the dataset from a local path or an `http(s)://` URL.
    pub async fn load(source: &str) -> Result<Self> {
        let body = if is_remote(source) {
            fetch_remote(source).await?
        } else {
            read_local(Path::new(source)).await?
        };

        let dataset = Self::from_json_str(&body)?;
        info!(
            "Loaded {} rules with {} columns from {}",
            dataset.len(),
            dataset.columns.len(),
            source
        );
        Ok(dataset)
    }

    /// Parse a JSON document that must be an array of flat objects.
    pub fn from_json_str(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|err| AppError::load(format!("response is not valid JSON: {err}")))?;

        let Value::Array(items) = value else {
            return Err(AppError::load("expected a JSON array of rules"));
        };

        let mut rules = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => rules.push(Rule::new(map)),
                other => {
                    return Err(AppError::load(format!(
                        "entry {idx} is not an object (found {})",
                        json_kind(&other)
                    )));
                }
            }
        }

        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.columns.iter().any(|column| column == key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct cancer types, sorted, for the cancer picker.
    pub fn cancer_types(&self) -> Vec<String> {
        self.distinct(CANCER_TYPE)
    }

    /// Distinct trial ids, sorted, for the trial picker.
    pub fn trial_ids(&self) -> Vec<String> {
        self.distinct(TRIAL_ID)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            rules: self.rules.len(),
            cancer_types: self.cancer_types().len(),
            trials: self.trial_ids().len(),
        }
    }

    fn distinct(&self, key: &str) -> Vec<String> {
        self.rules
            .iter()
            .map(|rule| rule.text(key))
            .filter(|value| !value.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_remote(url: &str) -> Result<String> {
    let response = reqwest::get(url)
        .await
        .map_err(|err| AppError::load(format!("request to {url} failed: {err}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::load(format!("{url} returned HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|err| AppError::load(format!("failed to read body from {url}: {err}")))
}

async fn read_local(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| AppError::load(format!("failed to read {}: {err}", path.display())))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
