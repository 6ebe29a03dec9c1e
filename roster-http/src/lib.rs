//! HTTP API for Roster
//!
//! JSON endpoints over [`roster_core::Services`]. Domain errors are mapped to
//! status codes in [`error`].

pub mod dto;
pub mod error;
pub mod routes;

use std::future::Future;

use roster_core::Services;
use tokio::net::TcpListener;

pub use error::{ApiError, ApiResult};
pub use routes::router;

/// Serve the API on `listener` until `shutdown` resolves
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<F>(listener: TcpListener, services: Services, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Starting Roster API server");
    }

    axum::serve(listener, router(services))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
