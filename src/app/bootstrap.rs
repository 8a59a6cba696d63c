use std::path::{Path, PathBuf};

use log::debug;

use crate::app::controller::AppController;
use crate::cli::{Cli, Commands};
use crate::config::{load_config_file, ViewerConfig};
use crate::error::Result;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "criteria-viewer.json";

/// Entry point used by `main` to bootstrap the controller stack.
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.data)?;
    debug!("Resolved viewer config: {config:?}");
    let controller = AppController::new(config);
    controller
        .run(cli.command.unwrap_or(Commands::Browse))
        .await
}

/// Builtin defaults, then the config file, then CLI flags.
pub fn resolve_config(path: Option<&Path>, data: Option<String>) -> Result<ViewerConfig> {
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                load_config_file(&fallback)?
            } else {
                ViewerConfig::builtin()
            }
        }
    };
    if let Some(source) = data {
        config.data_source = source;
    }
    Ok(config)
}
