//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::uptime::ProcessClock;

/// Shared application state, cloneable across handlers.
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub clock: ProcessClock,
}

impl AppState {
    /// Creates a new application state from the given configuration and process clock.
    pub fn new(config: AppConfig, clock: ProcessClock) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }
}
