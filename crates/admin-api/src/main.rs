//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Admin API server binary
//!
//! Reads the optional config file named by `ADMIN_API_CONFIG`, then
//! `ADMIN_API_` environment overrides.

use admin_api::{AdminApiServer, ApiConfig, ADMIN_API_VERSION};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("ADMIN_API_CONFIG").ok();
    let config = ApiConfig::load(config_path.as_deref())?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting admin API v{}", ADMIN_API_VERSION);

    let server = AdminApiServer::new(config).await?;
    server.run().await?;

    Ok(())
}
