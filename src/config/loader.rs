use std::{fs, path::Path, path::PathBuf};

use log::warn;
use serde::Deserialize;

use crate::error::{Context, Result};

use super::{validator, ViewerConfig};

/// On-disk shape of the optional config file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawViewerConfig {
    pub data_source: Option<String>,
    pub page_sizes: Option<Vec<usize>>,
    pub default_page_size: Option<usize>,
    pub search_debounce_ms: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub export_filename: Option<String>,
    pub visible_columns: Option<Vec<String>>,
}

/// Load `path` over the builtin defaults. A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<ViewerConfig> {
    if !path.exists() {
        warn!(
            "Config file {} not found; using builtin defaults",
            path.display()
        );
        return Ok(ViewerConfig::builtin());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read viewer config at {}", path.display()))?;
    let raw: RawViewerConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse viewer config at {}", path.display()))?;

    let config = ViewerConfig::builtin().merged(raw);
    validator::validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "criteria_viewer_{}_{}.json",
            name,
            std::process::id()
        ));
        fs::write(&path, body).expect("write fixture");
        path
    }

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let config = load_config_file(Path::new("no/such/viewer.json")).expect("defaults");
        assert_eq!(config, ViewerConfig::builtin());
    }

    #[test]
    fn file_values_override_defaults() {
        let path = write_fixture(
            "override",
            r#"{"data_source": "https://example.org/rules.json", "default_page_size": 25}"#,
        );
        let config = load_config_file(&path).expect("config loads");
        assert_eq!(config.data_source, "https://example.org/rules.json");
        assert_eq!(config.default_page_size, 25);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let path = write_fixture("unknown", r#"{"page_size": 25}"#);
        let err = load_config_file(&path).expect_err("unknown key rejected");
        assert!(
            format!("{err:#}").contains("failed to parse"),
            "unexpected error: {err}"
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_values_fail_validation() {
        let path = write_fixture("invalid", r#"{"default_page_size": 30}"#);
        let err = load_config_file(&path).expect_err("invalid page size");
        assert!(
            err.to_string().contains("default_page_size"),
            "unexpected error: {err}"
        );
        let _ = fs::remove_file(&path);
    }
}
