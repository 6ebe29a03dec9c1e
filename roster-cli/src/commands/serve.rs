//! Serve command - run the HTTP API

use clap::Args;
use roster_core::Config;
use tokio::net::TcpListener;

use super::open_services;

/// Run the HTTP server until Ctrl-C
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides config and env)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (db, services) = open_services(config).await?;

        let addr = config.server.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;

        roster_http::serve(listener, services, shutdown_signal()).await?;

        db.close().await;
        tracing::info!("Database closed");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C"),
    }
}
