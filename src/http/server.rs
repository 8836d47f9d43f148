//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the HTTP server on `config.http.host` and the given port.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig, port: u16) -> Result<(), ServerError> {
    let raw_addr = format!("{}:{}", config.http.host, port);
    let addr: SocketAddr = raw_addr
        .parse()
        .map_err(|_| ServerError::InvalidAddress(raw_addr.clone()))?;

    let handle = Handle::new();
    let grace = Duration::from_secs(config.http.shutdown_grace_seconds);
    shutdown::setup_shutdown_handler(handle.clone(), grace);

    tracing::info!(%addr, "Starting server at http://{}", addr);

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
