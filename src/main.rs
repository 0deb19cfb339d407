//! larkd server binary.

use std::sync::Arc;

use larkd::config::Config;
use larkd::network::Gateway;
use larkd::state::ServerState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "failed to load config");
        e
    })?;

    info!(
        server = %config.server.name,
        listen = %config.listen.address,
        version = %larkd::VERSION,
        "starting larkd"
    );

    let state = Arc::new(ServerState::new(&config));

    let gateway = Gateway::bind(config.listen.address, state).await?;
    gateway.run().await?;

    Ok(())
}
