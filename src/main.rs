use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod api;
mod config;
mod engine;
mod models;
mod probe;

use crate::api::DashboardState;
use crate::config::WatchdogConfig;
use crate::engine::Poller;
use crate::probe::Prober;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into()))
        .with_ansi(true)
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = WatchdogConfig::load(&config_path)?;

    let prober = Prober::new(Duration::from_millis(config.probe_timeout_ms));
    let poll_interval = Duration::from_millis(config.poll_interval_ms);

    let prod = Arc::new(Poller::new("prod", config.prod_endpoints(), prober.clone(), poll_interval));
    let dev = Arc::new(Poller::new("dev", config.dev_endpoints(), prober, poll_interval));

    let token = CancellationToken::new();
    let prod_handle = tokio::spawn(Arc::clone(&prod).run(token.clone()));
    let dev_handle = tokio::spawn(Arc::clone(&dev).run(token.clone()));

    let state = DashboardState {
        prod,
        dev,
        poll_interval_ms: config.poll_interval_ms,
    };
    let api_port = config.api_port;
    tokio::spawn(async move {
        api::start_server(api_port, state).await;
    });

    signal::ctrl_c().await?;
    info!("Shutdown signal received. Stopping watchdog...");
    token.cancel();
    let _ = prod_handle.await;
    let _ = dev_handle.await;

    Ok(())
}
