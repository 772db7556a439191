use anyhow::Context;
use tracing::info;

use lcu_bridge::modules::{config, logger};
use lcu_bridge::proxy::AxumServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();

    let mut app_config = config::load_app_config()
        .map_err(anyhow::Error::msg)
        .context("failed to load configuration")?;
    config::apply_env_overrides(&mut app_config);

    let (server, handle) = AxumServer::start(&app_config)
        .await
        .map_err(anyhow::Error::msg)?;

    info!("Open your browser to: http://localhost:{}", app_config.port);
    info!("Make sure the League client is running, or submit credentials via POST /api/lockfile");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutdown signal received, stopping");
    server.stop();
    let _ = handle.await;

    Ok(())
}
