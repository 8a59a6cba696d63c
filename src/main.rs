use anyhow::Result;
use clap::Parser;

use criteria_viewer::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = criteria_viewer::app::run(cli).await {
        if err.is_load() {
            eprintln!("Unable to open the criteria dataset.");
        }
        return Err(err.into());
    }
    Ok(())
}
