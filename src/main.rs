use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use gamestate_relay::{config::Config, routes, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    let state = AppState::from_config(&config).context("failed to initialise relay")?;
    let mode = state.forwarder.mode().name();

    let app = routes::create_router(config.max_message_bytes).with_state(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, mode, model = %config.model, "Server is running on http://localhost:{}", config.port);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
