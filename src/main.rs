use cdnscrape::config::{Config, DEFAULT_CONFIG_PATH};

use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Arc::new(Config::load(&path)?);
    info!(config = %path.display(), "Configuration loaded");

    tokio::fs::create_dir_all(&config.output_folder).await?;

    cdnscrape::bot::run(config).await?;
    Ok(())
}
