//! Process launcher.
//!
//! Reads `PORT` from the environment (after loading `.env` if present) and runs
//! the server binary bound to that port, with stdio inherited from the launcher.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::config::{DEFAULT_PORT, PORT_ENV_VAR};

/// Name of the server binary started by the launcher.
pub const SERVER_BINARY: &str = "vitals";

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Invalid PORT value '{0}': expected a port between 1 and 65535")]
    InvalidPort(String),

    #[error("Failed to start server: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Server exited with {0}")]
    Exited(ExitStatus),
}

/// Resolve the port from a raw `PORT` value. Unset or blank means [`DEFAULT_PORT`].
pub fn resolve_port(raw: Option<&str>) -> Result<u16, LaunchError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(DEFAULT_PORT);
    };

    match raw.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(LaunchError::InvalidPort(raw.to_string())),
    }
}

/// Locate the server binary: next to the current executable if present, else on `PATH`.
pub fn server_program() -> PathBuf {
    let sibling = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SERVER_BINARY)))
        .filter(|path| path.is_file());

    sibling.unwrap_or_else(|| PathBuf::from(SERVER_BINARY))
}

/// Build the start command for `program` bound to `port`.
pub fn start_command(program: impl AsRef<OsStr>, port: u16) -> Command {
    let mut command = Command::new(program);
    command
        .arg("--port")
        .arg(port.to_string())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    command
}

/// Load `.env`, resolve the port and run the server until it exits.
pub fn run() -> Result<(), LaunchError> {
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    let raw = std::env::var(PORT_ENV_VAR).ok();
    let port = resolve_port(raw.as_deref())?;
    let program = server_program();

    tracing::info!(program = %program.display(), port, "Starting server");

    let status = start_command(&program, port).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(LaunchError::Exited(status))
    }
}
