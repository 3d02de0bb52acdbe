use std::sync::Arc;

use anyhow::{Context, Result};
use taal_app::config::Config;
use taal_logger::LoggerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Reads .env as a side effect.
    let (config, source) = Config::load().context("failed to load configuration")?;

    let _guard = LoggerConfig::from_settings(config.logger.clone()).init();

    info!("Starting taal");
    info!("Configuration loaded from {}", source);

    let localizer = Arc::new(taal_app::build_localizer(&config.i18n)?);
    info!("Current language: {}", localizer.language());

    taal_app::build_server(&config, localizer).start().await
}
