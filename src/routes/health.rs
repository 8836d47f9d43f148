//! Health check endpoint for container orchestration.
//!
//! A liveness probe reporting status, uptime, environment and version. It only
//! checks that the process can respond to HTTP; no dependencies are probed.

use std::any::Any;
use std::env::VarError;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, HealthError};
use crate::report::{ErrorReport, HealthReport, UNKNOWN_ERROR};
use crate::state::AppState;

/// Health check handler.
///
/// Only GET is answered; every other method, HEAD included, gets 405.
pub async fn health(
    State(state): State<AppState>,
    method: Method,
) -> Result<Json<HealthReport>, AppError> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed(method));
    }

    let report = build_report(&state)?;
    tracing::debug!(uptime = report.uptime, "Health check passed");
    Ok(Json(report))
}

/// Assemble a report from the process clock, environment and package version.
pub fn build_report(state: &AppState) -> Result<HealthReport, HealthError> {
    let environment = read_environment(&state.config.health.environment_var)?;
    Ok(HealthReport::healthy(state.clock.uptime_secs(), environment))
}

fn read_environment(var: &str) -> Result<Option<String>, HealthError> {
    match std::env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(HealthError::Environment {
            var: var.to_string(),
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

/// Response for a panic caught while handling a health check.
///
/// Panic payloads are not error values, so the message is always [`UNKNOWN_ERROR`].
pub fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Health check panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorReport::unhealthy(UNKNOWN_ERROR)),
    )
        .into_response()
}
