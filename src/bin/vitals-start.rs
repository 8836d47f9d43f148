//! Launcher: starts the `vitals` server on the port given by `PORT` (default 5001).

use vitals::launcher::{self, LaunchError};

const LAUNCHER_LOG_FILTER: &str = "vitals=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| LAUNCHER_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_filter))
        .init();

    match launcher::run() {
        Err(LaunchError::Exited(status)) => {
            tracing::error!(%status, "Server exited unsuccessfully");
            std::process::exit(status.code().unwrap_or(1));
        }
        result => result.map_err(Into::into),
    }
}
