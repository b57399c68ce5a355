use std::sync::Arc;

use anyhow::Context;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod link;
mod motion;

use config::load_settings;
use motion::MotionState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings()?;
    let listener = TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!(bind_addr = %settings.bind_addr, "robot: listening for a controller");

    let motion = Arc::new(RwLock::new(MotionState::default()));
    tokio::select! {
        _ = link::serve(listener, Arc::clone(&motion), settings.status_interval()) => {}
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for shutdown signal")?;
            info!("robot: shutting down");
        }
    }

    motion.write().await.reset();
    Ok(())
}
