use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{
    debug,
    info,
};
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod server;

use crate::{
    args::Args,
    config::Config,
    server::AppState,
};


#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::resolve(Args::parse())?;
    debug!("{config:?}");

    let timeout = config.submit_timeout;
    let backend = config.backend.clone();
    let scrobbler = tokio::task::spawn_blocking(move || backend.connect(timeout))
        .await?
        .context("Failed to connect to the scrobbling service")?;
    info!("Connected to {} successfully using {}.", scrobbler.name(), config.source);

    let listener = TcpListener::bind(config.bind).await.with_context(|| format!("Binding {}", config.bind))?;
    info!("Plex Scrobbler listening on http://{}{}", listener.local_addr()?, server::WEBHOOK_PATH);

    let app = server::router(AppState {
        scrobbler,
        submit_timeout: config.submit_timeout,
    });
    axum::serve(listener, app).await?;

    anyhow::Ok(())
}
