use std::path::PathBuf;

use climate_service::{ClimateServiceConfig, logging, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional path to a TOML config file
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ClimateServiceConfig::load_from_path(config_path)?;

    logging::init_tracing(&config.logging)?;
    tracing::info!(
        "Starting climate service v{} (NOAA lookup {}, geocoding {})",
        climate_service::VERSION,
        if config.noaa.enabled { "enabled" } else { "disabled" },
        if config.geocoding.api_key.is_some() { "enabled" } else { "disabled" },
    );

    web::run(config).await
}
