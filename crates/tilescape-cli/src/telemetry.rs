//! Logging setup for the binary.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tilescape_world=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;

    info!("Telemetry initialized");
    Ok(())
}
