use crate::error::{AppError, Result};

use super::ViewerConfig;

/// Longest quiescence window accepted for the search box.
const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Validate a merged config and surface every issue at once.
pub fn validate_config(config: &ViewerConfig) -> Result<()> {
    let mut issues = Vec::new();

    validate_source(config, &mut issues);
    validate_page_sizes(config, &mut issues);
    validate_export(config, &mut issues);

    if config.search_debounce_ms > MAX_DEBOUNCE_MS {
        issues.push(format!(
            "search_debounce_ms {} exceeds the {MAX_DEBOUNCE_MS} ms limit",
            config.search_debounce_ms
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_source(config: &ViewerConfig, issues: &mut Vec<String>) {
    if config.data_source.trim().is_empty() {
        issues.push("data_source must not be empty".to_string());
    }
}

fn validate_page_sizes(config: &ViewerConfig, issues: &mut Vec<String>) {
    if config.page_sizes.is_empty() {
        issues.push("page_sizes must list at least one size".to_string());
    }
    if config.page_sizes.contains(&0) {
        issues.push("page_sizes must not contain 0".to_string());
    }
    if !config.page_sizes.contains(&config.default_page_size) {
        issues.push(format!(
            "default_page_size {} is not one of page_sizes {:?}",
            config.default_page_size, config.page_sizes
        ));
    }
}

fn validate_export(config: &ViewerConfig, issues: &mut Vec<String>) {
    let name = config.export_filename.trim();
    if name.is_empty() {
        issues.push("export_filename must not be empty".to_string());
    } else if name.contains('/') || name.contains('\\') {
        issues.push(format!(
            "export_filename `{name}` must be a bare file name; use export_dir for the location"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        validate_config(&ViewerConfig::builtin()).expect("builtin config should be valid");
    }

    #[test]
    fn reports_every_issue() {
        let config = ViewerConfig {
            data_source: " ".to_string(),
            page_sizes: vec![0, 25],
            default_page_size: 40,
            search_debounce_ms: 60_000,
            export_filename: "out/rules.csv".to_string(),
            ..ViewerConfig::builtin()
        };

        let message = validate_config(&config)
            .expect_err("validation should fail")
            .to_string();
        for needle in [
            "data_source",
            "must not contain 0",
            "default_page_size 40",
            "exceeds",
            "bare file name",
        ] {
            assert!(message.contains(needle), "missing `{needle}` in: {message}");
        }
    }
}
